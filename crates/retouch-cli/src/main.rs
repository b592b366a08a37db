//! retouch - RGBA adjustment pipeline CLI
//!
//! Reads headerless raw pixel files, runs the adjustment pipeline and
//! writes the result back as raw bytes.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "retouch")]
#[command(author, version, about = "RGBA pixel adjustment pipeline")]
#[command(long_about = "
Applies grayscale, blur, invert, sepia, brightness/contrast and
saturation/hue adjustments to raw RGBA, RGB or grayscale pixel files.
Stages always run in that order.

Examples:
  retouch adjust in.rgba -o out.rgba -W 640 -H 480 --brightness 20
  retouch adjust in.rgb -o out.rgba -W 640 -H 480 --layout rgb --hue-rotate 180
  retouch adjust in.rgba -o out.rgba -W 4000 -H 3000 --preset warm.yaml --fit 1200x800
  retouch params --json
  retouch stats out.rgba -W 640 -H 480
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the adjustment pipeline on a raw image
    #[command(visible_alias = "a")]
    Adjust(AdjustArgs),

    /// List adjustments with their ranges
    #[command(visible_alias = "p")]
    Params(ParamsArgs),

    /// Per-channel statistics of a raw image
    #[command(visible_alias = "s")]
    Stats(StatsArgs),
}

/// Raw image geometry shared by commands that read pixels.
#[derive(Args)]
struct RawInput {
    /// Input raw pixel file
    input: PathBuf,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    /// Input byte layout: rgba, rgb, gray
    #[arg(short, long, default_value = "rgba")]
    layout: String,
}

#[derive(Args)]
struct AdjustArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw pixel file
    #[arg(short, long)]
    output: PathBuf,

    /// Output byte layout (defaults to rgba)
    #[arg(long, default_value = "rgba")]
    out_layout: String,

    /// Preset file (YAML or JSON); flags below override it
    #[arg(long)]
    preset: Option<PathBuf>,

    /// Pipeline config file (YAML or JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Downscale to fit WxH before adjusting (e.g. 1200x800)
    #[arg(long)]
    fit: Option<String>,

    /// Brightness offset (-100..100)
    #[arg(long, allow_hyphen_values = true)]
    brightness: Option<i32>,

    /// Contrast (-100..100)
    #[arg(long, allow_hyphen_values = true)]
    contrast: Option<i32>,

    /// Saturation (-100..100)
    #[arg(long, allow_hyphen_values = true)]
    saturation: Option<i32>,

    /// Blur intensity (0..100)
    #[arg(long)]
    blur: Option<i32>,

    /// Grayscale mix (0..100)
    #[arg(long)]
    grayscale: Option<i32>,

    /// Sepia mix (0..100)
    #[arg(long)]
    sepia: Option<i32>,

    /// Hue rotation in degrees (-180..180)
    #[arg(long, allow_hyphen_values = true)]
    hue_rotate: Option<i32>,

    /// Invert colors
    #[arg(long)]
    invert: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ParamsArgs {
    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct StatsArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

/// Installs the global subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Adjust(args) => commands::adjust::run(args, cli.verbose),
        Commands::Params(args) => commands::params::run(args),
        Commands::Stats(args) => commands::stats::run(args, cli.verbose),
    }
}
