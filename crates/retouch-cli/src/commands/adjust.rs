//! Adjust command
//!
//! Loads a raw image, optionally shrinks it to a preview size, runs the
//! pipeline and writes the result. Stage failures and the black-guard
//! fallback are reported but do not fail the command.

use crate::AdjustArgs;
use anyhow::{Context, Result};
use retouch_ops::{AdjustmentParams, Pipeline, PipelineConfig, PreviewLimits, RunReport};
use serde_json::json;
use tracing::{info, trace, warn};

pub fn run(args: AdjustArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.raw.input.display(), output = %args.output.display(), "adjust::run");

    let params = resolve_params(&args)?;
    let config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let out_layout = super::parse_layout(&args.out_layout)?;

    let mut source = super::load_raw(&args.raw)?;
    if let Some(fit) = &args.fit {
        let (w, h) = super::parse_size(fit)?;
        let limits = PreviewLimits::new(w, h)?;
        source = retouch_ops::downscale_to_fit(&source, limits).context("Preview downscale failed")?;
    }

    let (width, height) = source.dimensions();
    info!(width, height, %params, "Adjusting");
    if verbose > 0 {
        println!("Adjusting {} ({}x{}): {}", args.raw.input.display(), width, height, params);
    }

    let adjusted = Pipeline::new(config)
        .run(&source, &params)
        .context("Adjustment failed")?;
    report_warnings(&adjusted.report);

    super::save_raw(&args.output, &adjusted.buffer, out_layout)?;

    if args.json {
        println!("{}", report_json(&adjusted.report, &params)?);
    } else if verbose > 0 {
        print_report(&adjusted.report);
        let size = std::fs::metadata(&args.output).map(|m| m.len()).unwrap_or(0);
        println!("Wrote {} ({})", args.output.display(), super::format_size(size));
    }

    Ok(())
}

/// Preset first, then every flag given on the command line.
fn resolve_params(args: &AdjustArgs) -> Result<AdjustmentParams> {
    let mut params = match &args.preset {
        Some(path) => AdjustmentParams::from_file(path)
            .with_context(|| format!("Failed to load preset: {}", path.display()))?,
        None => AdjustmentParams::neutral(),
    };

    if let Some(v) = args.brightness {
        params.brightness = v;
    }
    if let Some(v) = args.contrast {
        params.contrast = v;
    }
    if let Some(v) = args.saturation {
        params.saturation = v;
    }
    if let Some(v) = args.blur {
        params.blur = v;
    }
    if let Some(v) = args.grayscale {
        params.grayscale = v;
    }
    if let Some(v) = args.sepia {
        params.sepia = v;
    }
    if let Some(v) = args.hue_rotate {
        params.hue_rotate = v;
    }
    if args.invert {
        params.invert = true;
    }

    let clamped = params.clamped();
    if clamped != params {
        warn!(requested = %params, used = %clamped, "Parameters out of range were clamped");
    }
    Ok(params)
}

fn report_warnings(report: &RunReport) {
    for failure in &report.failed {
        eprintln!("warning: {} stage skipped: {}", failure.stage, failure.error);
    }
    if report.fell_back {
        eprintln!("warning: output was black, wrote the unmodified source instead");
    }
}

fn print_report(report: &RunReport) {
    let names = |kinds: &[retouch_ops::StageKind]| {
        kinds.iter().map(|k| k.name()).collect::<Vec<_>>().join(", ")
    };
    println!("Applied: {}", if report.applied.is_empty() { "none".into() } else { names(&report.applied) });
    println!("Skipped: {}", if report.skipped.is_empty() { "none".into() } else { names(&report.skipped) });
}

fn report_json(report: &RunReport, params: &AdjustmentParams) -> Result<String> {
    let value = json!({
        "params": params,
        "applied": report.applied.iter().map(|k| k.name()).collect::<Vec<_>>(),
        "skipped": report.skipped.iter().map(|k| k.name()).collect::<Vec<_>>(),
        "failed": report.failed.iter().map(|f| json!({
            "stage": f.stage.name(),
            "error": f.error.to_string(),
        })).collect::<Vec<_>>(),
        "fellBack": report.fell_back,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
