//! Channel primitives for 8-bit RGBA pixels.
//!
//! This module provides the leaf-level helpers every adjustment stage is
//! built on: channel addressing, the final float-to-byte clamp, and
//! per-channel statistics.
//!
//! # Types
//!
//! - [`Channel`] - Named channel of an interleaved RGBA pixel
//! - [`Rgba8`] - One pixel as `[R, G, B, A]`
//! - [`ChannelStats`] - Min/max/mean per channel over a whole buffer
//!
//! # Memory Layout
//!
//! Pixels are stored interleaved, `[R G B A R G B A ...]`, one byte per
//! channel. Alpha is carried through every adjustment untouched.
//!
//! ```
//! use retouch_core::pixel::{clamp_channel, Channel};
//!
//! assert_eq!(Channel::Blue.index(), 2);
//! assert_eq!(clamp_channel(300.0), 255);
//! assert_eq!(clamp_channel(76.5), 77);
//! ```

use std::fmt;

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// One RGBA8 pixel as `[R, G, B, A]`.
pub type Rgba8 = [u8; CHANNELS];

/// Named channel of an RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red, offset 0.
    Red,
    /// Green, offset 1.
    Green,
    /// Blue, offset 2.
    Blue,
    /// Alpha, offset 3. Never modified by adjustments.
    Alpha,
}

impl Channel {
    /// All channels in memory order.
    pub const ALL: [Channel; 4] = [Channel::Red, Channel::Green, Channel::Blue, Channel::Alpha];

    /// Color channels only.
    pub const RGB: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Byte offset of this channel inside a pixel.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Channel::Red => "R",
            Channel::Green => "G",
            Channel::Blue => "B",
            Channel::Alpha => "A",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts a working float channel value to a byte.
///
/// Rounds half away from zero, then clamps to `[0, 255]`. NaN maps to 0.
/// This is the single write-back point for every float stage.
#[inline]
pub fn clamp_channel(v: f32) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Returns `true` if every color channel of `px` is at or below `black_level`.
#[inline]
pub fn is_black(px: Rgba8, black_level: u8) -> bool {
    px[0] <= black_level && px[1] <= black_level && px[2] <= black_level
}

/// Min/max/mean of a single channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSummary {
    /// Smallest value seen.
    pub min: u8,
    /// Largest value seen.
    pub max: u8,
    /// Arithmetic mean.
    pub mean: f32,
}

/// Per-channel statistics over a buffer, in [`Channel::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    /// One summary per channel (R, G, B, A).
    pub channels: [ChannelSummary; CHANNELS],
    /// Number of pixels summarised.
    pub pixel_count: usize,
}

impl ChannelStats {
    /// Computes statistics over interleaved RGBA bytes.
    ///
    /// An empty slice yields zeros everywhere.
    pub fn from_rgba(data: &[u8]) -> Self {
        let mut min = [u8::MAX; CHANNELS];
        let mut max = [0u8; CHANNELS];
        let mut sum = [0u64; CHANNELS];
        let mut count = 0usize;

        for px in data.chunks_exact(CHANNELS) {
            for c in 0..CHANNELS {
                min[c] = min[c].min(px[c]);
                max[c] = max[c].max(px[c]);
                sum[c] += px[c] as u64;
            }
            count += 1;
        }

        let summary = |c: usize| {
            if count == 0 {
                ChannelSummary { min: 0, max: 0, mean: 0.0 }
            } else {
                ChannelSummary {
                    min: min[c],
                    max: max[c],
                    mean: (sum[c] as f64 / count as f64) as f32,
                }
            }
        };

        Self {
            channels: [summary(0), summary(1), summary(2), summary(3)],
            pixel_count: count,
        }
    }

    /// Summary for one channel.
    #[inline]
    pub fn get(&self, channel: Channel) -> ChannelSummary {
        self.channels[channel.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_channel_index() {
        for (i, c) in Channel::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        assert_eq!(Channel::Alpha.to_string(), "A");
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(-12.0), 0);
        assert_eq!(clamp_channel(0.49), 0);
        assert_eq!(clamp_channel(0.5), 1);
        assert_eq!(clamp_channel(254.6), 255);
        assert_eq!(clamp_channel(1e9), 255);
        assert_eq!(clamp_channel(f32::NAN), 0);
        assert_eq!(clamp_channel(f32::NEG_INFINITY), 0);
    }

    #[test]
    fn test_is_black() {
        assert!(is_black([0, 0, 0, 255], 0));
        assert!(is_black([2, 1, 0, 0], 2));
        assert!(!is_black([0, 0, 1, 255], 0));
    }

    #[test]
    fn test_stats() {
        let data = [10, 20, 30, 255, 30, 40, 50, 128];
        let stats = ChannelStats::from_rgba(&data);
        assert_eq!(stats.pixel_count, 2);
        let r = stats.get(Channel::Red);
        assert_eq!((r.min, r.max), (10, 30));
        assert_abs_diff_eq!(r.mean, 20.0, epsilon = 1e-6);
        assert_eq!(stats.get(Channel::Alpha).min, 128);
    }

    #[test]
    fn test_stats_empty() {
        let stats = ChannelStats::from_rgba(&[]);
        assert_eq!(stats.pixel_count, 0);
        assert_eq!(stats.get(Channel::Green).max, 0);
    }
}
