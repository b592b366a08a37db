//! Preview downscaling.
//!
//! Interactive editors adjust a reduced copy of the source so each run stays
//! cheap. [`downscale_to_fit`] shrinks a buffer to fit [`PreviewLimits`]
//! with aspect ratio preserved; it never enlarges.
//!
//! Resampling is a two-pass separable triangle filter whose support widens
//! with the scale factor, so every source pixel contributes when shrinking.
//!
//! ```rust
//! use retouch_ops::preview::fit_dimensions;
//!
//! assert_eq!(fit_dimensions(2400, 1200, 1200, 800), (1200, 600));
//! assert_eq!(fit_dimensions(640, 480, 1200, 800), (640, 480));
//! ```

use retouch_core::{clamp_channel, PixelBuffer, CHANNELS};
use tracing::debug;

use crate::{OpsError, OpsResult};

/// Largest preview size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewLimits {
    /// Maximum width in pixels.
    pub max_width: u32,
    /// Maximum height in pixels.
    pub max_height: u32,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            max_width: 1200,
            max_height: 800,
        }
    }
}

impl PreviewLimits {
    /// Creates limits; both must be non-zero.
    pub fn new(max_width: u32, max_height: u32) -> OpsResult<Self> {
        if max_width == 0 || max_height == 0 {
            return Err(OpsError::InvalidDimensions(
                "preview limits must be > 0".into(),
            ));
        }
        Ok(Self {
            max_width,
            max_height,
        })
    }

    /// True if a `width x height` image already fits.
    pub fn contains(&self, width: u32, height: u32) -> bool {
        width <= self.max_width && height <= self.max_height
    }
}

/// Aspect-preserving size that fits inside `max_w x max_h`.
///
/// Returns the source size unchanged when it already fits. Each side is
/// at least 1.
pub fn fit_dimensions(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }
    let scale_w = max_w as f64 / src_w as f64;
    let scale_h = max_h as f64 / src_h as f64;
    let scale = scale_w.min(scale_h);

    let new_w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let new_h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (new_w, new_h)
}

/// Shrinks `buffer` to fit `limits`, or returns a copy if it already fits.
pub fn downscale_to_fit(buffer: &PixelBuffer, limits: PreviewLimits) -> OpsResult<PixelBuffer> {
    buffer.validate()?;
    let (src_w, src_h) = buffer.dimensions();
    if limits.contains(src_w, src_h) {
        return Ok(buffer.clone());
    }

    let (dst_w, dst_h) = fit_dimensions(src_w, src_h, limits.max_width, limits.max_height);
    debug!(src_w, src_h, dst_w, dst_h, "Downscaling preview");

    let src: Vec<f32> = buffer.as_bytes().iter().map(|&b| b as f32).collect();
    let (sw, sh, dw, dh) = (src_w as usize, src_h as usize, dst_w as usize, dst_h as usize);

    let temp = resample_horizontal(&src, sw, sh, dw);
    let out = resample_vertical(&temp, dw, sh, dh);

    let data = out.into_iter().map(clamp_channel).collect();
    Ok(PixelBuffer::from_raw(dst_w, dst_h, data)?)
}

/// Triangle filter weight.
#[inline]
fn triangle(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Source taps and weights for one destination coordinate.
fn taps(dst: usize, scale: f32, src_len: usize) -> (usize, Vec<f32>) {
    let support = scale.max(1.0);
    let center = (dst as f32 + 0.5) * scale - 0.5;
    let first = ((center - support).floor() as isize).max(0) as usize;
    let last = ((center + support).ceil().max(0.0) as usize).min(src_len - 1);

    let mut weights: Vec<f32> = (first..=last)
        .map(|s| triangle((s as f32 - center) / support))
        .collect();
    let sum: f32 = weights.iter().sum();
    if sum > 0.0 {
        for w in &mut weights {
            *w /= sum;
        }
    }
    (first, weights)
}

fn resample_horizontal(src: &[f32], src_w: usize, src_h: usize, dst_w: usize) -> Vec<f32> {
    let mut dst = vec![0.0f32; dst_w * src_h * CHANNELS];
    let scale = src_w as f32 / dst_w as f32;

    for x in 0..dst_w {
        let (first, weights) = taps(x, scale, src_w);
        for y in 0..src_h {
            let mut acc = [0.0f32; CHANNELS];
            for (k, w) in weights.iter().enumerate() {
                let i = (y * src_w + first + k) * CHANNELS;
                for c in 0..CHANNELS {
                    acc[c] += src[i + c] * w;
                }
            }
            let o = (y * dst_w + x) * CHANNELS;
            dst[o..o + CHANNELS].copy_from_slice(&acc);
        }
    }
    dst
}

fn resample_vertical(src: &[f32], width: usize, src_h: usize, dst_h: usize) -> Vec<f32> {
    let mut dst = vec![0.0f32; width * dst_h * CHANNELS];
    let scale = src_h as f32 / dst_h as f32;

    for y in 0..dst_h {
        let (first, weights) = taps(y, scale, src_h);
        for x in 0..width {
            let mut acc = [0.0f32; CHANNELS];
            for (k, w) in weights.iter().enumerate() {
                let i = ((first + k) * width + x) * CHANNELS;
                for c in 0..CHANNELS {
                    acc[c] += src[i + c] * w;
                }
            }
            let o = (y * width + x) * CHANNELS;
            dst[o..o + CHANNELS].copy_from_slice(&acc);
        }
    }
    dst
}
