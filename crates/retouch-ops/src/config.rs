//! Pipeline configuration.
//!
//! Several stages have more than one reasonable formula (luma weights,
//! contrast curve, blur kernel, saturation model, hue precision). Each choice
//! is a named constant here, and a [`PipelineConfig`] fixes one of each for
//! every stage of a run. The defaults are:
//!
//! | Setting      | Default                          |
//! |--------------|----------------------------------|
//! | `luma`       | `classic` (0.3 / 0.59 / 0.11)    |
//! | `contrast`   | `midpoint` (259 formula)         |
//! | `blur`       | `box` (radius `ceil(b/20)`, 1-5) |
//! | `saturation` | `hsl`                            |
//! | `hue`        | `exact`                          |
//! | `black_guard`| enabled, level 0, coverage 1.0   |
//!
//! # Loading
//!
//! ```rust
//! use retouch_ops::config::{BlurKernel, PipelineConfig};
//!
//! let cfg = PipelineConfig::from_yaml_str("blur: gaussian\nluma: bt601\n").unwrap();
//! assert_eq!(cfg.blur, BlurKernel::Gaussian);
//! assert!(cfg.black_guard.enabled);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::params::is_json;
use crate::{OpsError, OpsResult};

/// Luma weighting triple for grayscale and luma-based saturation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LumaWeights {
    /// `0.3 R + 0.59 G + 0.11 B`.
    #[default]
    Classic,
    /// `0.2989 R + 0.5870 G + 0.1140 B`.
    Bt601,
}

impl LumaWeights {
    /// Returns `[wr, wg, wb]`.
    #[inline]
    pub const fn weights(self) -> [f32; 3] {
        match self {
            LumaWeights::Classic => [0.3, 0.59, 0.11],
            LumaWeights::Bt601 => [0.2989, 0.5870, 0.1140],
        }
    }
}

/// Brightness/contrast formulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContrastModel {
    /// Add brightness, then `f * (v - 128) + 128` with
    /// `f = 259 (c + 100) / (100 (259 - c))`.
    #[default]
    Midpoint,
    /// Single affine step `(1 + c/100) * v + brightness`.
    LinearGain,
}

/// Blur kernel used by the spatial stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlurKernel {
    /// Uniform window, radius `clamp(ceil(b/20), 1, 5)`.
    #[default]
    Box,
    /// Gaussian, size `max(1, floor(b/10)) * 2 + 1`.
    Gaussian,
}

/// How saturation is scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SaturationModel {
    /// Scale HSL saturation, lightness preserved.
    #[default]
    Hsl,
    /// Push channels away from luma: `y + f (v - y)`.
    Luma,
}

/// Hue rotation precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HueShift {
    /// Continuous degrees.
    #[default]
    Exact,
    /// 8-bit hue channel semantics: 180 steps of 2 degrees.
    Quantized,
}

/// Post-run check that replaces a (near-)black result with the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackGuard {
    /// Whether the check runs at all.
    pub enabled: bool,
    /// A pixel counts as black when R, G and B are all at or below this.
    pub black_level: u8,
    /// Fraction of black pixels (0-1) that triggers the fallback.
    pub coverage: f32,
}

impl Default for BlackGuard {
    fn default() -> Self {
        Self {
            enabled: true,
            black_level: 0,
            coverage: 1.0,
        }
    }
}

impl BlackGuard {
    /// A guard that never triggers.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Rejects a coverage outside `(0, 1]`.
    pub fn validate(&self) -> OpsResult<()> {
        if !(self.coverage > 0.0 && self.coverage <= 1.0) {
            return Err(OpsError::InvalidParameter(format!(
                "black_guard.coverage must be in (0, 1], got {}",
                self.coverage
            )));
        }
        Ok(())
    }
}

/// Formula choices for one pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Luma weights.
    pub luma: LumaWeights,
    /// Contrast model.
    pub contrast: ContrastModel,
    /// Blur kernel.
    pub blur: BlurKernel,
    /// Saturation model.
    pub saturation: SaturationModel,
    /// Hue precision.
    pub hue: HueShift,
    /// All-black fallback.
    pub black_guard: BlackGuard,
}

impl PipelineConfig {
    /// Parses YAML.
    pub fn from_yaml_str(yaml: &str) -> OpsResult<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parses JSON.
    pub fn from_json_str(json: &str) -> OpsResult<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks values serde cannot constrain.
    pub fn validate(&self) -> OpsResult<()> {
        self.black_guard.validate()
    }

    /// Loads a config file; `.json` is parsed as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> OpsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Replaces the black guard.
    pub fn with_black_guard(mut self, guard: BlackGuard) -> Self {
        self.black_guard = guard;
        self
    }

    /// Replaces the luma weights.
    pub fn with_luma(mut self, luma: LumaWeights) -> Self {
        self.luma = luma;
        self
    }

    /// Replaces the contrast model.
    pub fn with_contrast(mut self, contrast: ContrastModel) -> Self {
        self.contrast = contrast;
        self
    }

    /// Replaces the blur kernel.
    pub fn with_blur(mut self, blur: BlurKernel) -> Self {
        self.blur = blur;
        self
    }

    /// Replaces the saturation model.
    pub fn with_saturation(mut self, saturation: SaturationModel) -> Self {
        self.saturation = saturation;
        self
    }

    /// Replaces the hue precision.
    pub fn with_hue(mut self, hue: HueShift) -> Self {
        self.hue = hue;
        self
    }
}
