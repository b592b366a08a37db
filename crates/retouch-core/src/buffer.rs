//! Owned RGBA8 pixel buffer.
//!
//! [`PixelBuffer`] is the unit every adjustment consumes and produces: a
//! `width x height` grid of 8-bit RGBA pixels.
//!
//! # Memory Layout
//!
//! Pixels are stored in **row-major** order, top-to-bottom, interleaved:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! There is no row padding: the stride is always `width * 4` bytes.
//!
//! # Usage
//!
//! ```rust
//! use retouch_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::filled(4, 2, [128, 128, 128, 255]).unwrap();
//! buf.set_pixel(1, 1, [255, 0, 0, 255]);
//!
//! assert_eq!(buf.pixel(1, 1), [255, 0, 0, 255]);
//! assert_eq!(buf.as_bytes().len(), 4 * 2 * 4);
//! ```
//!
//! # Invariants
//!
//! - `width > 0` and `height > 0`
//! - `data.len() == width * height * 4`
//!
//! Every constructor enforces both; [`PixelBuffer::validate`] re-checks them.

use crate::pixel::{is_black, Channel, ChannelStats, Rgba8, CHANNELS};
use crate::{Error, Result};

/// Owned 8-bit RGBA image buffer.
///
/// Cloning copies the pixel data, so a clone can be mutated freely without
/// affecting the original. Adjustment code relies on this to keep the
/// caller's source untouched.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Creates a buffer of transparent black pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if either dimension is zero or
    /// the byte count overflows `usize`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use retouch_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::new(1920, 1080).unwrap();
    /// assert_eq!(buf.dimensions(), (1920, 1080));
    /// assert!(PixelBuffer::new(0, 10).is_err());
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height, CHANNELS)?;
        Ok(Self {
            data: vec![0; len],
            width,
            height,
        })
    }

    /// Creates a buffer where every pixel equals `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba8) -> Result<Self> {
        let len = byte_len(width, height, CHANNELS)?;
        let mut data = Vec::with_capacity(len);
        for _ in 0..len / CHANNELS {
            data.extend_from_slice(&pixel);
        }
        Ok(Self { data, width, height })
    }

    /// Wraps existing interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] for zero dimensions, overflow, or a
    ///   byte count that is not a whole number of samples per pixel.
    /// - [`Error::ChannelMismatch`] when the data is a whole number of
    ///   samples per pixel, but not four.
    ///
    /// # Example
    ///
    /// ```rust
    /// use retouch_core::PixelBuffer;
    ///
    /// let buf = PixelBuffer::from_raw(1, 1, vec![255, 0, 0, 255]).unwrap();
    /// assert_eq!(buf.pixel(0, 0), [255, 0, 0, 255]);
    ///
    /// // RGB data is rejected with a channel mismatch
    /// let err = PixelBuffer::from_raw(2, 1, vec![0; 6]).unwrap_err();
    /// assert!(err.is_invalid_buffer());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_len(width, height, CHANNELS, data.len())?;
        Ok(Self { data, width, height })
    }

    /// Expands interleaved RGB bytes to RGBA with opaque alpha.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_len(width, height, 3, data.len())?;
        let mut rgba = Vec::with_capacity(data.len() / 3 * CHANNELS);
        for px in data.chunks_exact(3) {
            rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok(Self {
            data: rgba,
            width,
            height,
        })
    }

    /// Expands single-channel gray bytes to opaque RGBA (`R = G = B`).
    pub fn from_gray(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_len(width, height, 1, data.len())?;
        let mut rgba = Vec::with_capacity(data.len() * CHANNELS);
        for &v in &data {
            rgba.extend_from_slice(&[v, v, v, 255]);
        }
        Ok(Self {
            data: rgba,
            width,
            height,
        })
    }

    /// Re-checks the buffer invariants.
    ///
    /// Useful at API boundaries: the adjustment pipeline calls this before
    /// touching any pixel.
    pub fn validate(&self) -> Result<()> {
        check_len(self.width, self.height, CHANNELS, self.data.len())
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Returns the raw interleaved bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns the raw interleaved bytes mutably.
    ///
    /// The slice length is fixed, so the buffer invariants cannot be broken
    /// through it.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the buffer and returns the raw bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8 {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let mut px = [0u8; CHANNELS];
        px.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        px
    }

    /// Returns the pixel at (x, y), or [`Error::OutOfBounds`].
    pub fn try_pixel(&self, x: u32, y: u32) -> Result<Rgba8> {
        if x < self.width && y < self.height {
            Ok(self.pixel(x, y))
        } else {
            Err(Error::out_of_bounds(x, y, self.width, self.height))
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba8) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        self.data[offset..offset + CHANNELS].copy_from_slice(&px);
    }

    /// Returns a single channel of the pixel at (x, y).
    #[inline]
    pub fn channel(&self, x: u32, y: u32, channel: Channel) -> u8 {
        self.pixel(x, y)[channel.index()]
    }

    /// Sets a single channel of the pixel at (x, y).
    #[inline]
    pub fn set_channel(&mut self, x: u32, y: u32, channel: Channel, value: u8) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y) + channel.index();
        self.data[offset] = value;
    }

    /// Iterates over all pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Iterates over rows as byte slices.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.data.chunks_exact(self.stride())
    }

    /// Iterates over the alpha channel in pixel order.
    pub fn alpha(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.chunks_exact(CHANNELS).map(|px| px[3])
    }

    /// Fraction of pixels whose color channels are all `<= black_level`.
    pub fn black_fraction(&self, black_level: u8) -> f32 {
        let total = self.pixel_count();
        if total == 0 {
            return 0.0;
        }
        let black = self.pixels().filter(|&px| is_black(px, black_level)).count();
        black as f32 / total as f32
    }

    /// Returns `true` if every pixel's color channels are `<= black_level`.
    ///
    /// Alpha is ignored.
    pub fn is_all_black(&self, black_level: u8) -> bool {
        self.pixels().all(|px| is_black(px, black_level))
    }

    /// Per-channel min/max/mean.
    pub fn channel_stats(&self) -> ChannelStats {
        ChannelStats::from_rgba(&self.data)
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Byte length of a `width x height` image with `channels` samples per pixel.
fn byte_len(width: u32, height: u32, channels: usize) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::invalid_dimensions(width, height, "zero-area image"));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))
}

/// Validates `len` against the expected size, classifying the mismatch.
fn check_len(width: u32, height: u32, channels: usize, len: usize) -> Result<()> {
    let expected = byte_len(width, height, channels)?;
    if len == expected {
        return Ok(());
    }
    let pixels = width as usize * height as usize;
    if len % pixels == 0 {
        let got = len / pixels;
        if let (Ok(expected), Ok(got)) = (u8::try_from(channels), u8::try_from(got)) {
            return Err(Error::channel_mismatch(expected, got));
        }
    }
    Err(Error::invalid_dimensions(
        width,
        height,
        format!("expected {} bytes, got {}", expected, len),
    ))
}
