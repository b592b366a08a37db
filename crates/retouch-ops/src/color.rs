//! Per-pixel color math.
//!
//! All functions work on an [`Rgb`] triple in 8-bit channel units
//! (`0.0..=255.0` nominal). Values are `f32` and are not rounded between
//! stages; only the final write-back quantizes to bytes.
//!
//! # HSL
//!
//! [`rgb_to_hsl`] / [`hsl_to_rgb`] use the chroma form:
//!
//! ```text
//! l = (max + min) / 2
//! s = delta / (1 - |2l - 1|)        (0 when delta == 0)
//! h = 60 * sector(max channel)      in [0, 360)
//! ```
//!
//! ```rust
//! use retouch_ops::color::{hsl_to_rgb, rgb_to_hsl};
//!
//! let hsl = rgb_to_hsl([255.0, 0.0, 0.0]);
//! assert_eq!(hsl.h, 0.0);
//! let cyan = hsl_to_rgb(hsl.rotate(180.0));
//! assert!((cyan[1] - 255.0).abs() < 1e-3 && cyan[0].abs() < 1e-3);
//! ```

use crate::config::LumaWeights;

/// Working color triple `[R, G, B]` in 8-bit units.
pub type Rgb = [f32; 3];

/// Sepia matrix rows, applied as `out[i] = dot(SEPIA[i], rgb)`.
pub const SEPIA: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Contrast midpoint in 8-bit units.
pub const MIDPOINT: f32 = 128.0;

/// Clamps to `[0, 255]`.
#[inline]
pub fn clamp_255(v: f32) -> f32 {
    v.clamp(0.0, 255.0)
}

/// Clamps to `[0, 1]`.
#[inline]
pub fn clamp_unit(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Clamps each channel to `[0, 255]`.
#[inline]
pub fn clamp_rgb(rgb: Rgb) -> Rgb {
    [clamp_255(rgb[0]), clamp_255(rgb[1]), clamp_255(rgb[2])]
}

/// Weighted luma of `rgb`.
#[inline]
pub fn luma(rgb: Rgb, weights: LumaWeights) -> f32 {
    let w = weights.weights();
    w[0] * rgb[0] + w[1] * rgb[1] + w[2] * rgb[2]
}

/// Linear blend `a * (1 - t) + b * t` per channel.
#[inline]
pub fn mix(a: Rgb, b: Rgb, t: f32) -> Rgb {
    let k = 1.0 - t;
    [
        a[0] * k + b[0] * t,
        a[1] * k + b[1] * t,
        a[2] * k + b[2] * t,
    ]
}

/// Blends `rgb` toward its luma by `amount` (0-1).
#[inline]
pub fn grayscale_mix(rgb: Rgb, amount: f32, weights: LumaWeights) -> Rgb {
    let y = luma(rgb, weights);
    mix(rgb, [y, y, y], amount)
}

/// Sepia-toned version of `rgb`, each channel clamped to `[0, 255]`.
#[inline]
pub fn sepia_tone(rgb: Rgb) -> Rgb {
    let row = |m: [f32; 3]| clamp_255(m[0] * rgb[0] + m[1] * rgb[1] + m[2] * rgb[2]);
    [row(SEPIA[0]), row(SEPIA[1]), row(SEPIA[2])]
}

/// Blends `rgb` toward its sepia tone by `amount` (0-1).
#[inline]
pub fn sepia_mix(rgb: Rgb, amount: f32) -> Rgb {
    mix(rgb, sepia_tone(rgb), amount)
}

/// `255 - v` per channel.
#[inline]
pub fn invert(rgb: Rgb) -> Rgb {
    [255.0 - rgb[0], 255.0 - rgb[1], 255.0 - rgb[2]]
}

/// The "259" contrast factor for `contrast` in `[-100, 100]`.
///
/// Equals 1 at 0. The pole at 259 lies outside the accepted range.
#[inline]
pub fn contrast_factor(contrast: f32) -> f32 {
    (259.0 * (contrast + 100.0)) / (100.0 * (259.0 - contrast))
}

/// Pushes channels away from (or toward) luma by `factor`.
#[inline]
pub fn luma_saturate(rgb: Rgb, factor: f32, weights: LumaWeights) -> Rgb {
    let y = luma(rgb, weights);
    [
        y + factor * (rgb[0] - y),
        y + factor * (rgb[1] - y),
        y + factor * (rgb[2] - y),
    ]
}

/// Wraps an angle in degrees into `[0, 360)`.
#[inline]
pub fn wrap_hue(h: f32) -> f32 {
    let w = h.rem_euclid(360.0);
    // rem_euclid can return 360.0 for tiny negative inputs
    if w >= 360.0 { 0.0 } else { w }
}

/// Hue/saturation/lightness triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    /// Hue in degrees, `[0, 360)`.
    pub h: f32,
    /// Saturation, `[0, 1]`.
    pub s: f32,
    /// Lightness, `[0, 1]`.
    pub l: f32,
}

impl Hsl {
    /// Rotates hue by `degrees`, wrapping into `[0, 360)`.
    #[inline]
    pub fn rotate(self, degrees: f32) -> Self {
        Self {
            h: wrap_hue(self.h + degrees),
            ..self
        }
    }

    /// Scales saturation by `factor`, clamped to `[0, 1]`.
    #[inline]
    pub fn saturate(self, factor: f32) -> Self {
        Self {
            s: clamp_unit(self.s * factor),
            ..self
        }
    }

    /// Snaps hue to the nearest of 180 two-degree steps.
    #[inline]
    pub fn quantize_hue(self) -> Self {
        let step = (self.h / 2.0).round().rem_euclid(180.0);
        Self {
            h: step * 2.0,
            ..self
        }
    }
}

/// Converts 8-bit-unit RGB to HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = clamp_unit(rgb[0] / 255.0);
    let g = clamp_unit(rgb[1] / 255.0);
    let b = clamp_unit(rgb[2] / 255.0);

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta <= f32::EPSILON {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let s = clamp_unit(delta / (1.0 - (2.0 * l - 1.0).abs()));

    let sector = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    Hsl {
        h: wrap_hue(sector * 60.0),
        s,
        l,
    }
}

/// Converts HSL back to 8-bit-unit RGB.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = wrap_hue(hsl.h);
    let s = clamp_unit(hsl.s);
    let l = clamp_unit(hsl.l);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0).rem_euclid(2.0) - 1.0).abs());
    let m = l - c / 2.0;

    let (r1, g1, b1) = match (h / 60.0) as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    [(r1 + m) * 255.0, (g1 + m) * 255.0, (b1 + m) * 255.0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_rgb_eq(a: Rgb, b: Rgb, eps: f32) {
        for c in 0..3 {
            assert_abs_diff_eq!(a[c], b[c], epsilon = eps);
        }
    }

    #[test]
    fn test_luma_classic_red() {
        let y = luma([255.0, 0.0, 0.0], LumaWeights::Classic);
        assert_abs_diff_eq!(y, 76.5, epsilon = 1e-3);
        assert_eq!(retouch_core::clamp_channel(y), 77);
    }

    #[test]
    fn test_grayscale_mix_endpoints() {
        let rgb = [200.0, 100.0, 50.0];
        assert_eq!(grayscale_mix(rgb, 0.0, LumaWeights::Classic), rgb);
        let g = grayscale_mix(rgb, 1.0, LumaWeights::Bt601);
        assert_abs_diff_eq!(g[0], g[1], epsilon = 1e-4);
        assert_abs_diff_eq!(g[1], g[2], epsilon = 1e-4);
    }

    #[test]
    fn test_sepia_tone_clamped() {
        let s = sepia_tone([255.0, 255.0, 255.0]);
        assert_eq!(s[0], 255.0);
        assert_eq!(s[1], 255.0);
        assert_abs_diff_eq!(s[2], 0.937 * 255.0, epsilon = 1e-2);
    }

    #[test]
    fn test_sepia_mix_zero_is_identity() {
        let rgb = [12.0, 34.0, 56.0];
        assert_eq!(sepia_mix(rgb, 0.0), rgb);
    }

    #[test]
    fn test_invert_involution() {
        let rgb = [0.0, 17.0, 255.0];
        assert_eq!(invert(invert(rgb)), rgb);
    }

    #[test]
    fn test_contrast_factor() {
        assert_eq!(contrast_factor(0.0), 1.0);
        assert_eq!(contrast_factor(-100.0), 0.0);
        assert_abs_diff_eq!(contrast_factor(100.0), 259.0 * 200.0 / (100.0 * 159.0), epsilon = 1e-4);
        assert!(contrast_factor(50.0) > 1.0);
    }

    #[test]
    fn test_wrap_hue() {
        assert_eq!(wrap_hue(360.0), 0.0);
        assert_eq!(wrap_hue(-90.0), 270.0);
        assert_eq!(wrap_hue(540.0), 180.0);
        assert!(wrap_hue(-1e-7) < 360.0);
    }

    #[test]
    fn test_hsl_primaries() {
        let cases = [
            ([255.0, 0.0, 0.0], 0.0),
            ([255.0, 255.0, 0.0], 60.0),
            ([0.0, 255.0, 0.0], 120.0),
            ([0.0, 255.0, 255.0], 180.0),
            ([0.0, 0.0, 255.0], 240.0),
            ([255.0, 0.0, 255.0], 300.0),
        ];
        for (rgb, h) in cases {
            let hsl = rgb_to_hsl(rgb);
            assert_abs_diff_eq!(hsl.h, h, epsilon = 1e-3);
            assert_abs_diff_eq!(hsl.s, 1.0, epsilon = 1e-6);
            assert_abs_diff_eq!(hsl.l, 0.5, epsilon = 1e-6);
            assert_rgb_eq(hsl_to_rgb(hsl), rgb, 1e-3);
        }
    }

    #[test]
    fn test_hsl_gray_has_no_saturation() {
        let hsl = rgb_to_hsl([128.0, 128.0, 128.0]);
        assert_eq!(hsl.s, 0.0);
        assert_rgb_eq(hsl_to_rgb(hsl.rotate(123.0)), [128.0, 128.0, 128.0], 1e-3);
    }

    #[test]
    fn test_hsl_roundtrip_grid() {
        for r in (0..=255).step_by(51) {
            for g in (0..=255).step_by(51) {
                for b in (0..=255).step_by(51) {
                    let rgb = [r as f32, g as f32, b as f32];
                    assert_rgb_eq(hsl_to_rgb(rgb_to_hsl(rgb)), rgb, 0.05);
                }
            }
        }
    }

    #[test]
    fn test_red_half_rotation_is_cyan() {
        let out = hsl_to_rgb(rgb_to_hsl([255.0, 0.0, 0.0]).rotate(180.0));
        assert_rgb_eq(out, [0.0, 255.0, 255.0], 1e-3);
    }

    #[test]
    fn test_saturate_clamps() {
        let hsl = Hsl { h: 10.0, s: 0.8, l: 0.4 };
        assert_eq!(hsl.saturate(2.0).s, 1.0);
        assert_eq!(hsl.saturate(0.0).s, 0.0);
    }

    #[test]
    fn test_quantize_hue() {
        let q = Hsl { h: 359.2, s: 1.0, l: 0.5 }.quantize_hue();
        assert_eq!(q.h, 0.0);
        let q = Hsl { h: 33.1, s: 1.0, l: 0.5 }.quantize_hue();
        assert_eq!(q.h, 34.0);
    }

    #[test]
    fn test_luma_saturate() {
        let rgb = [200.0, 100.0, 50.0];
        assert_rgb_eq(luma_saturate(rgb, 1.0, LumaWeights::Classic), rgb, 1e-4);
        let flat = luma_saturate(rgb, 0.0, LumaWeights::Classic);
        assert_abs_diff_eq!(flat[0], flat[2], epsilon = 1e-4);
    }
}
