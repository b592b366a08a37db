//! Pipeline driver.
//!
//! [`Pipeline::run`] turns a source buffer and a parameter set into a new
//! buffer. The source is never modified, so repeated runs with different
//! parameters all start from the same original.
//!
//! # Failure handling
//!
//! - An unusable source (zero area, wrong byte count) is returned as
//!   [`OpsError::InvalidBuffer`]. Nothing else propagates.
//! - Each stage runs on a scratch copy of the working frame. If it fails,
//!   the copy is dropped, the failure is recorded in [`RunReport::failed`],
//!   and the next stage continues from the last good state.
//! - If the result is (near-)black while the source was not, the black
//!   guard returns the source unchanged and sets [`RunReport::fell_back`].
//!
//! # Example
//!
//! ```rust
//! use retouch_core::PixelBuffer;
//! use retouch_ops::{AdjustmentParams, Pipeline};
//!
//! let src = PixelBuffer::filled(2, 2, [128, 128, 128, 255]).unwrap();
//! let params = AdjustmentParams::neutral().with_brightness(50);
//! let out = Pipeline::default().run(&src, &params).unwrap();
//! assert_eq!(out.buffer.pixel(0, 0), [178, 178, 178, 255]);
//! assert!(out.report.is_clean());
//! ```

use retouch_core::PixelBuffer;
use tracing::{debug, trace, warn};

use crate::config::{BlackGuard, PipelineConfig};
use crate::frame::Frame;
use crate::params::AdjustmentParams;
use crate::stage::{stages_for, Stage, StageKind};
use crate::{OpsError, OpsResult};

/// A stage that failed and was left out of the result.
#[derive(Debug)]
pub struct StageFailure {
    /// The failing stage.
    pub stage: StageKind,
    /// What went wrong.
    pub error: OpsError,
}

/// What happened during one run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Stages that changed the frame, in order.
    pub applied: Vec<StageKind>,
    /// Stages skipped because their parameters were neutral.
    pub skipped: Vec<StageKind>,
    /// Stages whose effect was discarded.
    pub failed: Vec<StageFailure>,
    /// The black guard replaced the result with the source.
    pub fell_back: bool,
}

impl RunReport {
    /// No failures and no fallback.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.fell_back
    }
}

/// Output of [`Pipeline::run`].
#[derive(Debug)]
pub struct Adjusted {
    /// Adjusted buffer, same size as the source.
    pub buffer: PixelBuffer,
    /// Run report.
    pub report: RunReport,
}

/// Runs the six stages with a fixed configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Creates a pipeline with the given formula choices.
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Adjusts `source` with `params`.
    ///
    /// Out-of-range parameters are clamped. Only an invalid source is an
    /// error; stage failures are reported in [`Adjusted::report`].
    pub fn run(&self, source: &PixelBuffer, params: &AdjustmentParams) -> OpsResult<Adjusted> {
        source.validate()?;
        let params = params.clamped();
        let (width, height) = source.dimensions();
        trace!(width, height, %params, "Pipeline::run");

        let stages = stages_for(&params, &self.config);
        self.run_stages(source, &stages)
    }

    /// Runs an explicit stage list. Used by [`Pipeline::run`] and by tests
    /// that inject failing stages.
    pub fn run_stages(&self, source: &PixelBuffer, stages: &[Box<dyn Stage>]) -> OpsResult<Adjusted> {
        source.validate()?;
        let mut report = RunReport::default();
        let mut frame = Frame::from_buffer(source);

        for stage in stages {
            let kind = stage.kind();
            if stage.is_noop() {
                trace!(stage = %kind, "skip");
                report.skipped.push(kind);
                continue;
            }

            let mut scratch = frame.clone();
            match stage.apply(&mut scratch) {
                Ok(()) => {
                    debug!(stage = %kind, "applied");
                    frame = scratch;
                    report.applied.push(kind);
                }
                Err(error) => {
                    warn!(stage = %kind, %error, "stage failed, keeping previous state");
                    report.failed.push(StageFailure { stage: kind, error });
                }
            }
        }

        let buffer = frame.to_buffer()?;
        if self.black_guard_trips(source, &buffer) {
            warn!(
                black_level = self.config.black_guard.black_level,
                "output is black, falling back to the source"
            );
            report.fell_back = true;
            return Ok(Adjusted {
                buffer: source.clone(),
                report,
            });
        }

        debug!(
            applied = report.applied.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "pipeline done"
        );
        Ok(Adjusted { buffer, report })
    }

    fn black_guard_trips(&self, source: &PixelBuffer, output: &PixelBuffer) -> bool {
        let BlackGuard {
            enabled,
            black_level,
            coverage,
        } = self.config.black_guard;
        if !enabled {
            return false;
        }
        let is_black = |buf: &PixelBuffer| buf.black_fraction(black_level) >= coverage;
        is_black(output) && !is_black(source)
    }
}

/// Adjusts `source` with the default pipeline and returns only the buffer.
///
/// ```rust
/// use retouch_core::PixelBuffer;
/// use retouch_ops::{adjust, AdjustmentParams};
///
/// let red = PixelBuffer::filled(1, 1, [255, 0, 0, 255]).unwrap();
/// let gray = adjust(&red, &AdjustmentParams::neutral().with_grayscale(100)).unwrap();
/// assert_eq!(gray.pixel(0, 0), [77, 77, 77, 255]);
/// ```
pub fn adjust(source: &PixelBuffer, params: &AdjustmentParams) -> OpsResult<PixelBuffer> {
    Ok(Pipeline::default().run(source, params)?.buffer)
}
