//! # retouch-ops
//!
//! Pixel adjustment pipeline for RGBA8 images.
//!
//! A run takes a source [`PixelBuffer`](retouch_core::PixelBuffer) and an
//! [`AdjustmentParams`] value and produces a new buffer of the same size.
//! Six stages run in a fixed order, each skipped when its parameters are
//! neutral:
//!
//! ```text
//! grayscale -> blur -> invert -> sepia -> brightness/contrast -> saturation/hue
//! ```
//!
//! Alpha is never touched. Intermediate values are `f32` and are rounded
//! to bytes once, at the end.
//!
//! # Modules
//!
//! - [`params`] - Adjustment parameters, ranges, presets
//! - [`config`] - Formula choices per stage
//! - [`color`] - Per-pixel color math (luma, sepia, HSL)
//! - [`blur`] - Separable box and Gaussian blur
//! - [`stage`] - The six stages
//! - [`pipeline`] - Driver, failure isolation, black guard
//! - [`preview`] - Downscaling to a preview size
//!
//! # Example
//!
//! ```rust
//! use retouch_core::PixelBuffer;
//! use retouch_ops::{adjust, AdjustmentParams};
//!
//! let red = PixelBuffer::filled(1, 1, [255, 0, 0, 255]).unwrap();
//! let params = AdjustmentParams::neutral().with_hue_rotate(180);
//! let cyan = adjust(&red, &params).unwrap();
//! assert_eq!(cyan.pixel(0, 0), [0, 255, 255, 255]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - row-parallel stages via rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod blur;
pub mod color;
pub mod config;
pub mod frame;
pub mod params;
pub mod pipeline;
pub mod preview;
pub mod stage;

pub use config::PipelineConfig;
pub use error::{OpsError, OpsResult};
pub use frame::Frame;
pub use params::{Adjustment, AdjustmentParams};
pub use pipeline::{adjust, Adjusted, Pipeline, RunReport, StageFailure};
pub use preview::{downscale_to_fit, PreviewLimits};
pub use stage::{Stage, StageKind};
