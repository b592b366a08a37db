//! The six adjustment stages.
//!
//! Each stage owns the parameters it needs, resolved from
//! [`AdjustmentParams`] and [`PipelineConfig`] once per run. Stages run in
//! [`StageKind::ORDER`]:
//!
//! ```text
//! grayscale -> blur -> invert -> sepia -> brightness/contrast -> saturation/hue
//! ```
//!
//! A stage reports [`Stage::is_noop`] when its parameters are neutral. The
//! driver skips those, and running one anyway leaves 8-bit output unchanged.

use std::fmt;

use tracing::trace;

use crate::blur::{blur_radius, box_blur_rgb, gaussian_blur_rgb, gaussian_kernel_size, gaussian_sigma};
use crate::color::{
    contrast_factor, grayscale_mix, hsl_to_rgb, invert, luma_saturate, rgb_to_hsl, sepia_mix,
    MIDPOINT,
};
use crate::config::{BlurKernel, ContrastModel, HueShift, LumaWeights, PipelineConfig, SaturationModel};
use crate::frame::Frame;
use crate::params::AdjustmentParams;
use crate::OpsResult;

/// Identifies a stage and its position in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    /// Blend toward luma.
    Grayscale,
    /// Separable blur.
    Blur,
    /// `255 - v`.
    Invert,
    /// Blend toward the sepia matrix.
    Sepia,
    /// Brightness offset and contrast.
    BrightnessContrast,
    /// Saturation scale and hue rotation.
    SaturationHue,
}

impl StageKind {
    /// Fixed execution order.
    pub const ORDER: [StageKind; 6] = [
        StageKind::Grayscale,
        StageKind::Blur,
        StageKind::Invert,
        StageKind::Sepia,
        StageKind::BrightnessContrast,
        StageKind::SaturationHue,
    ];

    /// Short name used in logs and reports.
    pub const fn name(self) -> &'static str {
        match self {
            StageKind::Grayscale => "grayscale",
            StageKind::Blur => "blur",
            StageKind::Invert => "invert",
            StageKind::Sepia => "sepia",
            StageKind::BrightnessContrast => "brightness-contrast",
            StageKind::SaturationHue => "saturation-hue",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One step of the adjustment pipeline.
pub trait Stage: Send + Sync {
    /// Which stage this is.
    fn kind(&self) -> StageKind;

    /// True when the stage would not change the frame.
    fn is_noop(&self) -> bool;

    /// Transforms the frame in place.
    ///
    /// On return the RGB samples are finite and inside `[0, 255]`, or an
    /// error is returned and the frame contents are unspecified.
    fn apply(&self, frame: &mut Frame) -> OpsResult<()>;
}

/// Validates then clamps; every stage ends here.
fn finish(frame: &mut Frame, kind: StageKind) -> OpsResult<()> {
    frame.check_finite(kind.name())?;
    frame.clamp();
    Ok(())
}

/// Percentage `0..=100` as a `0..=1` blend factor.
#[inline]
fn amount(percent: i32) -> f32 {
    percent as f32 / 100.0
}

/// Blends every pixel toward its luma.
#[derive(Debug, Clone, Copy)]
pub struct GrayscaleStage {
    /// Mix percentage.
    pub percent: i32,
    /// Luma weights.
    pub luma: LumaWeights,
}

impl Stage for GrayscaleStage {
    fn kind(&self) -> StageKind {
        StageKind::Grayscale
    }

    fn is_noop(&self) -> bool {
        self.percent == 0
    }

    fn apply(&self, frame: &mut Frame) -> OpsResult<()> {
        let t = amount(self.percent);
        let luma = self.luma;
        frame.map_rgb(move |rgb| grayscale_mix(rgb, t, luma));
        finish(frame, self.kind())
    }
}

/// Two-pass separable blur.
#[derive(Debug, Clone, Copy)]
pub struct BlurStage {
    /// Blur intensity.
    pub amount: i32,
    /// Kernel shape.
    pub kernel: BlurKernel,
}

impl Stage for BlurStage {
    fn kind(&self) -> StageKind {
        StageKind::Blur
    }

    fn is_noop(&self) -> bool {
        self.amount <= 0
    }

    fn apply(&self, frame: &mut Frame) -> OpsResult<()> {
        if self.amount <= 0 {
            return finish(frame, self.kind());
        }
        let (w, h) = (frame.width(), frame.height());
        let out = match self.kernel {
            BlurKernel::Box => box_blur_rgb(frame.rgb(), w, h, blur_radius(self.amount))?,
            BlurKernel::Gaussian => {
                let size = gaussian_kernel_size(self.amount);
                gaussian_blur_rgb(frame.rgb(), w, h, size / 2, gaussian_sigma(size))?
            }
        };
        frame.replace_rgb(out)?;
        finish(frame, self.kind())
    }
}

/// Per-channel inversion.
#[derive(Debug, Clone, Copy)]
pub struct InvertStage {
    /// Whether to invert.
    pub enabled: bool,
}

impl Stage for InvertStage {
    fn kind(&self) -> StageKind {
        StageKind::Invert
    }

    fn is_noop(&self) -> bool {
        !self.enabled
    }

    fn apply(&self, frame: &mut Frame) -> OpsResult<()> {
        if self.enabled {
            frame.map_rgb(invert);
        }
        finish(frame, self.kind())
    }
}

/// Blends every pixel toward its sepia tone.
#[derive(Debug, Clone, Copy)]
pub struct SepiaStage {
    /// Mix percentage.
    pub percent: i32,
}

impl Stage for SepiaStage {
    fn kind(&self) -> StageKind {
        StageKind::Sepia
    }

    fn is_noop(&self) -> bool {
        self.percent == 0
    }

    fn apply(&self, frame: &mut Frame) -> OpsResult<()> {
        let t = amount(self.percent);
        frame.map_rgb(move |rgb| sepia_mix(rgb, t));
        finish(frame, self.kind())
    }
}

/// Brightness offset followed by contrast.
#[derive(Debug, Clone, Copy)]
pub struct ToneStage {
    /// Additive offset.
    pub brightness: i32,
    /// Contrast amount.
    pub contrast: i32,
    /// Formula.
    pub model: ContrastModel,
}

impl ToneStage {
    /// Maps one channel value.
    #[inline]
    pub fn map(&self, v: f32) -> f32 {
        let b = self.brightness as f32;
        let c = self.contrast as f32;
        match self.model {
            ContrastModel::Midpoint => contrast_factor(c) * (v + b - MIDPOINT) + MIDPOINT,
            ContrastModel::LinearGain => (1.0 + c / 100.0) * v + b,
        }
    }
}

impl Stage for ToneStage {
    fn kind(&self) -> StageKind {
        StageKind::BrightnessContrast
    }

    fn is_noop(&self) -> bool {
        self.brightness == 0 && self.contrast == 0
    }

    fn apply(&self, frame: &mut Frame) -> OpsResult<()> {
        let tone = *self;
        frame.map_rgb(move |[r, g, b]| [tone.map(r), tone.map(g), tone.map(b)]);
        finish(frame, self.kind())
    }
}

/// Saturation scale and hue rotation.
#[derive(Debug, Clone, Copy)]
pub struct HueSaturationStage {
    /// Saturation amount; scale is `1 + saturation/100`.
    pub saturation: i32,
    /// Rotation in degrees.
    pub hue_rotate: i32,
    /// Saturation formula.
    pub model: SaturationModel,
    /// Hue precision.
    pub hue: HueShift,
    /// Weights for the luma saturation model.
    pub luma: LumaWeights,
}

impl HueSaturationStage {
    /// Rotation actually applied, in degrees.
    ///
    /// Quantized mode rounds to whole 2-degree steps of the 0-180 hue scale.
    pub fn effective_rotation(&self) -> f32 {
        match self.hue {
            HueShift::Exact => self.hue_rotate as f32,
            HueShift::Quantized => (self.hue_rotate as f32 / 360.0 * 180.0).round() * 2.0,
        }
    }
}

impl Stage for HueSaturationStage {
    fn kind(&self) -> StageKind {
        StageKind::SaturationHue
    }

    fn is_noop(&self) -> bool {
        self.saturation == 0 && self.hue_rotate == 0
    }

    fn apply(&self, frame: &mut Frame) -> OpsResult<()> {
        let factor = 1.0 + self.saturation as f32 / 100.0;
        let rotation = self.effective_rotation();
        let rotate = self.hue_rotate != 0;
        let quantize = rotate && self.hue == HueShift::Quantized;
        let (model, luma) = (self.model, self.luma);
        trace!(factor, rotation, ?model, "saturation-hue");

        frame.map_rgb(move |rgb| {
            let rgb = match model {
                SaturationModel::Luma if factor != 1.0 => luma_saturate(rgb, factor, luma),
                _ => rgb,
            };
            let sat = if model == SaturationModel::Hsl { factor } else { 1.0 };
            if !rotate && sat == 1.0 {
                return rgb;
            }

            let mut hsl = rgb_to_hsl(rgb);
            if quantize {
                hsl = hsl.quantize_hue();
            }
            hsl_to_rgb(hsl.rotate(rotation).saturate(sat))
        });
        finish(frame, self.kind())
    }
}

/// Builds the six stages in execution order.
///
/// `params` are used as given; the driver clamps them first.
pub fn stages_for(params: &AdjustmentParams, config: &PipelineConfig) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(GrayscaleStage {
            percent: params.grayscale,
            luma: config.luma,
        }),
        Box::new(BlurStage {
            amount: params.blur,
            kernel: config.blur,
        }),
        Box::new(InvertStage {
            enabled: params.invert,
        }),
        Box::new(SepiaStage {
            percent: params.sepia,
        }),
        Box::new(ToneStage {
            brightness: params.brightness,
            contrast: params.contrast,
            model: config.contrast,
        }),
        Box::new(HueSaturationStage {
            saturation: params.saturation,
            hue_rotate: params.hue_rotate,
            model: config.saturation,
            hue: config.hue,
            luma: config.luma,
        }),
    ]
}
