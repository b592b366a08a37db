//! Raw byte adapters.
//!
//! Compressed formats (PNG, JPEG, ...) are decoded and encoded outside this
//! workspace. What arrives here is uncompressed, headerless pixel bytes in
//! one of three layouts, which are converted to and from [`PixelBuffer`].
//!
//! # Example
//!
//! ```rust
//! use retouch_core::raw::{decode_raw, encode_raw, RawLayout};
//!
//! let buf = decode_raw(vec![10, 20, 30], 1, 1, RawLayout::Rgb).unwrap();
//! assert_eq!(buf.pixel(0, 0), [10, 20, 30, 255]);
//! assert_eq!(encode_raw(&buf, RawLayout::Gray), vec![10]);
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::pixel::CHANNELS;
use crate::{Error, PixelBuffer, Result};

/// Interleaved byte layout of a raw pixel file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawLayout {
    /// One byte per pixel.
    Gray,
    /// Three bytes per pixel, no alpha.
    Rgb,
    /// Four bytes per pixel.
    #[default]
    Rgba,
}

impl RawLayout {
    /// Bytes per pixel.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            RawLayout::Gray => 1,
            RawLayout::Rgb => 3,
            RawLayout::Rgba => 4,
        }
    }

    /// Guesses the layout from a byte count, if it is unambiguous.
    pub fn infer(width: u32, height: u32, len: usize) -> Option<Self> {
        let pixels = (width as usize).checked_mul(height as usize)?;
        if pixels == 0 || len % pixels != 0 {
            return None;
        }
        match len / pixels {
            1 => Some(RawLayout::Gray),
            3 => Some(RawLayout::Rgb),
            4 => Some(RawLayout::Rgba),
            _ => None,
        }
    }
}

impl FromStr for RawLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gray" | "grey" | "l" | "1" => Ok(RawLayout::Gray),
            "rgb" | "3" => Ok(RawLayout::Rgb),
            "rgba" | "4" => Ok(RawLayout::Rgba),
            other => Err(Error::unsupported_layout(other)),
        }
    }
}

impl fmt::Display for RawLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RawLayout::Gray => "gray",
            RawLayout::Rgb => "rgb",
            RawLayout::Rgba => "rgba",
        })
    }
}

/// Converts raw bytes in `layout` to an RGBA buffer.
pub fn decode_raw(bytes: Vec<u8>, width: u32, height: u32, layout: RawLayout) -> Result<PixelBuffer> {
    match layout {
        RawLayout::Gray => PixelBuffer::from_gray(width, height, bytes),
        RawLayout::Rgb => PixelBuffer::from_rgb(width, height, bytes),
        RawLayout::Rgba => PixelBuffer::from_raw(width, height, bytes),
    }
}

/// Converts an RGBA buffer to raw bytes in `layout`.
///
/// `Gray` writes the red channel, `Rgb` drops alpha.
pub fn encode_raw(buffer: &PixelBuffer, layout: RawLayout) -> Vec<u8> {
    match layout {
        RawLayout::Rgba => buffer.as_bytes().to_vec(),
        RawLayout::Rgb => {
            let mut out = Vec::with_capacity(buffer.pixel_count() * 3);
            for px in buffer.as_bytes().chunks_exact(CHANNELS) {
                out.extend_from_slice(&px[..3]);
            }
            out
        }
        RawLayout::Gray => buffer
            .as_bytes()
            .chunks_exact(CHANNELS)
            .map(|px| px[0])
            .collect(),
    }
}

/// Reads a headerless raw pixel file.
pub fn read_raw(path: impl AsRef<Path>, width: u32, height: u32, layout: RawLayout) -> Result<PixelBuffer> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    debug!(path = %path.display(), width, height, %layout, bytes = bytes.len(), "read raw");
    decode_raw(bytes, width, height, layout)
}

/// Writes a buffer as a headerless raw pixel file.
pub fn write_raw(path: impl AsRef<Path>, buffer: &PixelBuffer, layout: RawLayout) -> Result<()> {
    let path = path.as_ref();
    let bytes = encode_raw(buffer, layout);
    debug!(path = %path.display(), %layout, bytes = bytes.len(), "write raw");
    std::fs::write(path, bytes)?;
    Ok(())
}
