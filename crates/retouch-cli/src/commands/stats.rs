//! Stats command
//!
//! Per-channel min/max/mean of a raw image, plus black-pixel coverage.

use crate::StatsArgs;
use anyhow::Result;
use retouch_core::Channel;
use serde_json::json;
use tracing::trace;

pub fn run(args: StatsArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.raw.input.display(), "stats::run");

    let buffer = super::load_raw(&args.raw)?;
    let stats = buffer.channel_stats();
    let black = buffer.black_fraction(0);

    if args.json {
        let channels: Vec<_> = Channel::ALL
            .iter()
            .map(|&ch| {
                let s = stats.get(ch);
                json!({ "channel": ch.name(), "min": s.min, "max": s.max, "mean": s.mean })
            })
            .collect();
        let value = json!({
            "width": buffer.width(),
            "height": buffer.height(),
            "pixels": stats.pixel_count,
            "blackFraction": black,
            "channels": channels,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}", args.raw.input.display());
    println!("  {}x{} ({} pixels)", buffer.width(), buffer.height(), stats.pixel_count);
    for ch in Channel::ALL {
        let s = stats.get(ch);
        println!("  {:<6} min {:>3}  max {:>3}  mean {:>7.2}", ch.name(), s.min, s.max, s.mean);
    }
    if verbose > 0 || black > 0.0 {
        println!("  black  {:.2}%", black * 100.0);
    }
    Ok(())
}
