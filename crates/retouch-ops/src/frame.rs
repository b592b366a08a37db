//! Floating-point working frame.
//!
//! A [`Frame`] holds the color channels of a [`PixelBuffer`] as `f32` in
//! 8-bit units, so consecutive stages do not compound rounding error. Alpha
//! is kept aside as the original bytes and is copied back verbatim by
//! [`Frame::to_buffer`]; no stage can reach it.
//!
//! # Memory Layout
//!
//! ```text
//! rgb:   [R G B R G B ...]   f32, row-major, width * height * 3
//! alpha: [A A ...]           u8,  width * height
//! ```

use retouch_core::{clamp_channel, PixelBuffer, CHANNELS};

use crate::color::{clamp_rgb, Rgb};
use crate::{OpsError, OpsResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Color samples per pixel in the working frame.
pub const RGB_CHANNELS: usize = 3;

/// Working copy of a pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: usize,
    height: usize,
    rgb: Vec<f32>,
    alpha: Vec<u8>,
}

impl Frame {
    /// Copies a buffer into a new working frame.
    pub fn from_buffer(buffer: &PixelBuffer) -> Self {
        let count = buffer.pixel_count();
        let mut rgb = Vec::with_capacity(count * RGB_CHANNELS);
        let mut alpha = Vec::with_capacity(count);
        for px in buffer.as_bytes().chunks_exact(CHANNELS) {
            rgb.extend_from_slice(&[px[0] as f32, px[1] as f32, px[2] as f32]);
            alpha.push(px[3]);
        }
        Self {
            width: buffer.width() as usize,
            height: buffer.height() as usize,
            rgb,
            alpha,
        }
    }

    /// Quantizes back to bytes: round, clamp to `[0, 255]`, restore alpha.
    pub fn to_buffer(&self) -> OpsResult<PixelBuffer> {
        let mut data = Vec::with_capacity(self.alpha.len() * CHANNELS);
        for (px, &a) in self.rgb.chunks_exact(RGB_CHANNELS).zip(&self.alpha) {
            data.extend_from_slice(&[
                clamp_channel(px[0]),
                clamp_channel(px[1]),
                clamp_channel(px[2]),
                a,
            ]);
        }
        Ok(PixelBuffer::from_raw(
            self.width as u32,
            self.height as u32,
            data,
        )?)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Interleaved RGB samples.
    #[inline]
    pub fn rgb(&self) -> &[f32] {
        &self.rgb
    }

    /// Interleaved RGB samples, mutable.
    #[inline]
    pub fn rgb_mut(&mut self) -> &mut [f32] {
        &mut self.rgb
    }

    /// Alpha bytes.
    #[inline]
    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    /// Color triple at (x, y).
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        let i = (y * self.width + x) * RGB_CHANNELS;
        [self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]]
    }

    /// Replaces the RGB samples with `rgb` produced by a spatial pass.
    pub(crate) fn replace_rgb(&mut self, rgb: Vec<f32>) -> OpsResult<()> {
        if rgb.len() != self.rgb.len() {
            return Err(OpsError::InvalidDimensions(format!(
                "expected {} samples, got {}",
                self.rgb.len(),
                rgb.len()
            )));
        }
        self.rgb = rgb;
        Ok(())
    }

    /// Applies `f` to every pixel, rows in parallel when available.
    pub fn map_rgb<F>(&mut self, f: F)
    where
        F: Fn(Rgb) -> Rgb + Sync + Send,
    {
        let row_len = (self.width * RGB_CHANNELS).max(1);
        let apply_row = |row: &mut [f32]| {
            for px in row.chunks_exact_mut(RGB_CHANNELS) {
                let out = f([px[0], px[1], px[2]]);
                px.copy_from_slice(&out);
            }
        };

        #[cfg(feature = "parallel")]
        self.rgb.par_chunks_mut(row_len).for_each(apply_row);

        #[cfg(not(feature = "parallel"))]
        self.rgb.chunks_mut(row_len).for_each(apply_row);
    }

    /// Clamps every RGB sample to `[0, 255]`.
    pub fn clamp(&mut self) {
        self.map_rgb(clamp_rgb);
    }

    /// Fails with [`OpsError::NonFinite`] if any sample is NaN or infinite.
    pub fn check_finite(&self, stage: &'static str) -> OpsResult<()> {
        if self.rgb.iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(OpsError::NonFinite { stage })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelBuffer {
        PixelBuffer::from_raw(2, 1, vec![10, 20, 30, 40, 250, 5, 0, 99]).unwrap()
    }

    #[test]
    fn test_roundtrip_is_exact() {
        let buf = sample();
        let frame = Frame::from_buffer(&buf);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.get(1, 0), [250.0, 5.0, 0.0]);
        assert_eq!(frame.alpha(), &[40, 99]);
        assert_eq!(frame.to_buffer().unwrap(), buf);
    }

    #[test]
    fn test_writeback_clamps_and_rounds() {
        let mut frame = Frame::from_buffer(&sample());
        frame.map_rgb(|[r, g, b]| [r * 100.0, g - 300.0, b + 0.6]);
        let out = frame.to_buffer().unwrap();
        assert_eq!(out.pixel(0, 0), [255, 0, 31, 40]);
        assert_eq!(out.pixel(1, 0), [255, 0, 1, 99]);
    }

    #[test]
    fn test_clamp() {
        let mut frame = Frame::from_buffer(&sample());
        frame.map_rgb(|[r, g, b]| [r - 100.0, g + 1000.0, b]);
        frame.clamp();
        assert!(frame.rgb().iter().all(|v| (0.0..=255.0).contains(v)));
    }

    #[test]
    fn test_check_finite() {
        let mut frame = Frame::from_buffer(&sample());
        assert!(frame.check_finite("test").is_ok());
        frame.rgb_mut()[4] = f32::NAN;
        assert!(matches!(
            frame.check_finite("test"),
            Err(OpsError::NonFinite { stage: "test" })
        ));
    }

    #[test]
    fn test_replace_rgb_length_checked() {
        let mut frame = Frame::from_buffer(&sample());
        assert!(frame.replace_rgb(vec![0.0; 5]).is_err());
        assert!(frame.replace_rgb(vec![1.0; 6]).is_ok());
        assert_eq!(frame.get(0, 0), [1.0, 1.0, 1.0]);
    }
}
