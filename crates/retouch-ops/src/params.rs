//! Adjustment parameters.
//!
//! [`AdjustmentParams`] is the immutable value a caller builds for one
//! adjustment run. Every field has a documented range and a neutral value;
//! a stage whose parameters are all neutral is skipped.
//!
//! | Field        | Range        | Neutral |
//! |--------------|--------------|---------|
//! | brightness   | -100..=100   | 0       |
//! | contrast     | -100..=100   | 0       |
//! | saturation   | -100..=100   | 0       |
//! | blur         | 0..=100      | 0       |
//! | grayscale    | 0..=100      | 0       |
//! | sepia        | 0..=100      | 0       |
//! | hue_rotate   | -180..=180   | 0       |
//! | invert       | bool         | false   |
//!
//! # Example
//!
//! ```rust
//! use retouch_ops::AdjustmentParams;
//!
//! let params = AdjustmentParams::neutral()
//!     .with_brightness(20)
//!     .with_hue_rotate(400); // out of range, clamped at run time
//!
//! assert_eq!(params.clamped().hue_rotate, 180);
//! assert!(!params.is_neutral());
//! ```
//!
//! # Presets
//!
//! Parameters deserialize from YAML or JSON with camelCase keys. Missing
//! keys take their neutral value:
//!
//! ```rust
//! use retouch_ops::AdjustmentParams;
//!
//! let p = AdjustmentParams::from_yaml_str("sepia: 60\nhueRotate: -30\n").unwrap();
//! assert_eq!((p.sepia, p.hue_rotate, p.blur), (60, -30, 0));
//! ```

use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{OpsError, OpsResult};

/// Parameter set for one adjustment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdjustmentParams {
    /// Additive offset in 8-bit channel units.
    pub brightness: i32,
    /// Contrast around the 128 midpoint.
    pub contrast: i32,
    /// Saturation scale, `1 + saturation/100`.
    pub saturation: i32,
    /// Blur intensity.
    pub blur: i32,
    /// Grayscale mix percentage.
    pub grayscale: i32,
    /// Sepia mix percentage.
    pub sepia: i32,
    /// Hue rotation in degrees.
    pub hue_rotate: i32,
    /// Per-channel inversion.
    pub invert: bool,
}

impl AdjustmentParams {
    /// All parameters at their neutral value.
    #[inline]
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Returns `true` if every parameter is neutral.
    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }

    /// Sets brightness.
    pub fn with_brightness(mut self, v: i32) -> Self {
        self.brightness = v;
        self
    }

    /// Sets contrast.
    pub fn with_contrast(mut self, v: i32) -> Self {
        self.contrast = v;
        self
    }

    /// Sets saturation.
    pub fn with_saturation(mut self, v: i32) -> Self {
        self.saturation = v;
        self
    }

    /// Sets blur intensity.
    pub fn with_blur(mut self, v: i32) -> Self {
        self.blur = v;
        self
    }

    /// Sets grayscale mix.
    pub fn with_grayscale(mut self, v: i32) -> Self {
        self.grayscale = v;
        self
    }

    /// Sets sepia mix.
    pub fn with_sepia(mut self, v: i32) -> Self {
        self.sepia = v;
        self
    }

    /// Sets hue rotation in degrees.
    pub fn with_hue_rotate(mut self, v: i32) -> Self {
        self.hue_rotate = v;
        self
    }

    /// Sets inversion.
    pub fn with_invert(mut self, v: bool) -> Self {
        self.invert = v;
        self
    }

    /// Returns a copy with every numeric field clamped into its range.
    pub fn clamped(&self) -> Self {
        let c = |adj: Adjustment, v: i32| {
            let r = adj.range();
            v.clamp(*r.start(), *r.end())
        };
        Self {
            brightness: c(Adjustment::Brightness, self.brightness),
            contrast: c(Adjustment::Contrast, self.contrast),
            saturation: c(Adjustment::Saturation, self.saturation),
            blur: c(Adjustment::Blur, self.blur),
            grayscale: c(Adjustment::Grayscale, self.grayscale),
            sepia: c(Adjustment::Sepia, self.sepia),
            hue_rotate: c(Adjustment::HueRotate, self.hue_rotate),
            invert: self.invert,
        }
    }

    /// Returns the value of one parameter (`invert` as 0/1).
    pub fn get(&self, adj: Adjustment) -> i32 {
        match adj {
            Adjustment::Brightness => self.brightness,
            Adjustment::Contrast => self.contrast,
            Adjustment::Saturation => self.saturation,
            Adjustment::Blur => self.blur,
            Adjustment::Grayscale => self.grayscale,
            Adjustment::Sepia => self.sepia,
            Adjustment::HueRotate => self.hue_rotate,
            Adjustment::Invert => self.invert as i32,
        }
    }

    /// Parses a YAML preset.
    pub fn from_yaml_str(yaml: &str) -> OpsResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a JSON preset.
    pub fn from_json_str(json: &str) -> OpsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a preset file; `.json` is parsed as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> OpsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        if is_json(path) {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> OpsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for AdjustmentParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for adj in Adjustment::ALL {
            let v = self.get(adj);
            if v == adj.neutral() {
                continue;
            }
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            match adj {
                Adjustment::Invert => write!(f, "invert")?,
                _ => write!(f, "{}={}", adj.name(), v)?,
            }
        }
        if first {
            f.write_str("neutral")?;
        }
        Ok(())
    }
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}

/// Names one adjustment parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Adjustment {
    /// Additive brightness.
    Brightness,
    /// Contrast around midpoint.
    Contrast,
    /// Saturation scale.
    Saturation,
    /// Blur intensity.
    Blur,
    /// Grayscale mix.
    Grayscale,
    /// Sepia mix.
    Sepia,
    /// Hue rotation.
    HueRotate,
    /// Inversion toggle.
    Invert,
}

impl Adjustment {
    /// Every adjustment, in the order the controls are listed.
    pub const ALL: [Adjustment; 8] = [
        Adjustment::Brightness,
        Adjustment::Contrast,
        Adjustment::Saturation,
        Adjustment::Blur,
        Adjustment::Grayscale,
        Adjustment::Sepia,
        Adjustment::HueRotate,
        Adjustment::Invert,
    ];

    /// Accepted range; `Invert` is `0..=1`.
    pub const fn range(self) -> RangeInclusive<i32> {
        match self {
            Adjustment::Brightness | Adjustment::Contrast | Adjustment::Saturation => -100..=100,
            Adjustment::Blur | Adjustment::Grayscale | Adjustment::Sepia => 0..=100,
            Adjustment::HueRotate => -180..=180,
            Adjustment::Invert => 0..=1,
        }
    }

    /// Neutral value.
    pub const fn neutral(self) -> i32 {
        0
    }

    /// Machine name, matching the preset key.
    pub const fn name(self) -> &'static str {
        match self {
            Adjustment::Brightness => "brightness",
            Adjustment::Contrast => "contrast",
            Adjustment::Saturation => "saturation",
            Adjustment::Blur => "blur",
            Adjustment::Grayscale => "grayscale",
            Adjustment::Sepia => "sepia",
            Adjustment::HueRotate => "hueRotate",
            Adjustment::Invert => "invert",
        }
    }

    /// Human label.
    pub const fn label(self) -> &'static str {
        match self {
            Adjustment::Brightness => "Brightness",
            Adjustment::Contrast => "Contrast",
            Adjustment::Saturation => "Saturation",
            Adjustment::Blur => "Blur",
            Adjustment::Grayscale => "Grayscale",
            Adjustment::Sepia => "Sepia",
            Adjustment::HueRotate => "Hue rotate",
            Adjustment::Invert => "Invert",
        }
    }

    /// Unit suffix for display.
    pub const fn unit(self) -> &'static str {
        match self {
            Adjustment::HueRotate => "deg",
            Adjustment::Blur | Adjustment::Grayscale | Adjustment::Sepia => "%",
            _ => "",
        }
    }
}
