//! Separable spatial blur.
//!
//! Both kernels run as two 1-D passes: a horizontal pass over every row into
//! a new buffer, then a vertical pass that reads only that finished buffer.
//! Cost is `O(w * h * r)` instead of `O(w * h * r^2)`.
//!
//! Samples past the image border reuse the nearest edge pixel
//! (clamp-to-edge). There is no wraparound and no zero padding.
//!
//! # Kernels
//!
//! - [`box_blur_rgb`] - uniform window of `2r + 1` samples, sliding sum
//! - [`gaussian_blur_rgb`] - normalized Gaussian weights
//!
//! # Example
//!
//! ```rust
//! use retouch_ops::blur::{blur_radius, box_blur_rgb};
//!
//! let src = vec![100.0f32; 8 * 8 * 3];
//! let out = box_blur_rgb(&src, 8, 8, blur_radius(40)).unwrap();
//! assert!(out.iter().all(|v| (v - 100.0).abs() < 1e-3));
//! ```

use tracing::{debug, trace};

use crate::frame::RGB_CHANNELS;
use crate::{OpsError, OpsResult};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Largest box radius the intensity scale maps to.
pub const MAX_BOX_RADIUS: usize = 5;

/// Box radius for a blur intensity: `clamp(ceil(amount / 20), 1, 5)`.
pub fn blur_radius(amount: i32) -> usize {
    let r = (amount.max(0) as f32 / 20.0).ceil() as usize;
    r.clamp(1, MAX_BOX_RADIUS)
}

/// Odd Gaussian kernel size: `max(1, floor(amount / 10)) * 2 + 1`.
pub fn gaussian_kernel_size(amount: i32) -> usize {
    ((amount.max(0) / 10).max(1) as usize) * 2 + 1
}

/// Sigma derived from the kernel size when none is given.
///
/// `0.3 * ((size - 1) / 2 - 1) + 0.8`
pub fn gaussian_sigma(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1-D Gaussian weights, `2 * radius + 1` entries.
pub fn gaussian_weights(radius: usize, sigma: f32) -> OpsResult<Vec<f32>> {
    if radius == 0 {
        return Err(OpsError::InvalidParameter("blur radius must be >= 1".into()));
    }
    if !(sigma.is_finite() && sigma > 0.0) {
        return Err(OpsError::InvalidParameter(format!(
            "gaussian sigma must be positive, got {}",
            sigma
        )));
    }

    let sigma2 = 2.0 * sigma * sigma;
    let r = radius as isize;
    let mut weights: Vec<f32> = (-r..=r)
        .map(|i| (-((i * i) as f32) / sigma2).exp())
        .collect();

    let sum: f32 = weights.iter().sum();
    if !(sum.is_finite() && sum > 0.0) {
        return Err(OpsError::InvalidParameter(format!(
            "degenerate gaussian kernel (sum {})",
            sum
        )));
    }
    for w in &mut weights {
        *w /= sum;
    }
    Ok(weights)
}

/// Box blur of interleaved RGB samples.
pub fn box_blur_rgb(src: &[f32], width: usize, height: usize, radius: usize) -> OpsResult<Vec<f32>> {
    trace!(width, height, radius, "box_blur_rgb");
    check(src, width, height)?;
    if radius == 0 {
        return Err(OpsError::InvalidParameter("blur radius must be >= 1".into()));
    }
    debug!(width, height, radius, "Applying box blur");

    let kernel = LineKernel::Box { radius };
    let temp = horizontal_pass(src, width, height, &kernel);
    Ok(vertical_pass(&temp, width, height, &kernel))
}

/// Gaussian blur of interleaved RGB samples.
pub fn gaussian_blur_rgb(
    src: &[f32],
    width: usize,
    height: usize,
    radius: usize,
    sigma: f32,
) -> OpsResult<Vec<f32>> {
    trace!(width, height, radius, sigma, "gaussian_blur_rgb");
    check(src, width, height)?;
    let weights = gaussian_weights(radius, sigma)?;
    debug!(width, height, size = weights.len(), sigma, "Applying gaussian blur");

    let kernel = LineKernel::Weighted { weights };
    let temp = horizontal_pass(src, width, height, &kernel);
    Ok(vertical_pass(&temp, width, height, &kernel))
}

fn check(src: &[f32], width: usize, height: usize) -> OpsResult<()> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidDimensions(
            "width and height must be > 0".into(),
        ));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|v| v.checked_mul(RGB_CHANNELS))
        .ok_or_else(|| OpsError::InvalidDimensions("image dimensions overflow".into()))?;
    if src.len() != expected {
        return Err(OpsError::InvalidDimensions(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }
    Ok(())
}

/// 1-D kernel applied along a line of pixels.
enum LineKernel {
    Box { radius: usize },
    Weighted { weights: Vec<f32> },
}

impl LineKernel {
    /// Filters one line of `len` pixels from `src` into `dst`.
    fn apply(&self, src: &[f32], dst: &mut [f32], len: usize) {
        match self {
            LineKernel::Box { radius } => box_line(src, dst, len, *radius),
            LineKernel::Weighted { weights } => weighted_line(src, dst, len, weights),
        }
    }
}

/// Sliding-window average with clamp-to-edge.
fn box_line(src: &[f32], dst: &mut [f32], len: usize, radius: usize) {
    let inv_size = 1.0 / (2 * radius + 1) as f32;
    let last = len - 1;

    for c in 0..RGB_CHANNELS {
        let at = |i: usize| src[i * RGB_CHANNELS + c];

        // Window centred on pixel 0: `radius` copies of the left edge,
        // then pixels 0..=radius (clamped)
        let mut sum = at(0) * radius as f32;
        for k in 0..=radius {
            sum += at(k.min(last));
        }

        for x in 0..len {
            dst[x * RGB_CHANNELS + c] = sum * inv_size;

            let left = x.saturating_sub(radius);
            let right = (x + radius + 1).min(last);
            sum += at(right) - at(left);
        }
    }
}

/// Weighted convolution with clamp-to-edge.
fn weighted_line(src: &[f32], dst: &mut [f32], len: usize, weights: &[f32]) {
    let radius = (weights.len() / 2) as isize;
    let last = len as isize - 1;

    for x in 0..len {
        let mut acc = [0.0f32; RGB_CHANNELS];
        for (k, &w) in weights.iter().enumerate() {
            let sx = (x as isize + k as isize - radius).clamp(0, last) as usize;
            let i = sx * RGB_CHANNELS;
            acc[0] += src[i] * w;
            acc[1] += src[i + 1] * w;
            acc[2] += src[i + 2] * w;
        }
        dst[x * RGB_CHANNELS..x * RGB_CHANNELS + RGB_CHANNELS].copy_from_slice(&acc);
    }
}

/// Filters every row into a new buffer.
fn horizontal_pass(src: &[f32], width: usize, height: usize, kernel: &LineKernel) -> Vec<f32> {
    let row_len = width * RGB_CHANNELS;
    let mut dst = vec![0.0f32; row_len * height];

    let run = |(y, row): (usize, &mut [f32])| {
        kernel.apply(&src[y * row_len..(y + 1) * row_len], row, width);
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(row_len).enumerate().for_each(run);

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(row_len).enumerate().for_each(run);

    dst
}

/// Filters every column: transpose, filter rows, transpose back.
///
/// `src` must be the completed output of the horizontal pass.
fn vertical_pass(src: &[f32], width: usize, height: usize, kernel: &LineKernel) -> Vec<f32> {
    let transposed = transpose(src, width, height);
    let filtered = horizontal_pass(&transposed, height, width, kernel);
    transpose(&filtered, height, width)
}

/// Swaps rows and columns of a `width x height` RGB image.
///
/// Input pixel (x, y) at `(y * width + x) * 3` moves to `(x * height + y) * 3`.
fn transpose(src: &[f32], width: usize, height: usize) -> Vec<f32> {
    let col_len = height * RGB_CHANNELS;
    let mut dst = vec![0.0f32; width * col_len];

    let run = |(x, col): (usize, &mut [f32])| {
        for y in 0..height {
            let s = (y * width + x) * RGB_CHANNELS;
            let d = y * RGB_CHANNELS;
            col[d..d + RGB_CHANNELS].copy_from_slice(&src[s..s + RGB_CHANNELS]);
        }
    };

    #[cfg(feature = "parallel")]
    dst.par_chunks_mut(col_len).enumerate().for_each(run);

    #[cfg(not(feature = "parallel"))]
    dst.chunks_mut(col_len).enumerate().for_each(run);

    dst
}
