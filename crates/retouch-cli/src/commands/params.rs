//! Params command
//!
//! Lists every adjustment with its range and neutral value.

use crate::ParamsArgs;
use anyhow::Result;
use retouch_ops::Adjustment;
use serde_json::json;

pub fn run(args: ParamsArgs) -> Result<()> {
    if args.json {
        let list: Vec<_> = Adjustment::ALL
            .iter()
            .map(|adj| {
                let range = adj.range();
                json!({
                    "name": adj.name(),
                    "label": adj.label(),
                    "min": range.start(),
                    "max": range.end(),
                    "neutral": adj.neutral(),
                    "unit": adj.unit(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    println!("{:<12} {:>6} {:>6} {:>8}  unit", "name", "min", "max", "neutral");
    for adj in Adjustment::ALL {
        let range = adj.range();
        println!(
            "{:<12} {:>6} {:>6} {:>8}  {}",
            adj.name(),
            range.start(),
            range.end(),
            adj.neutral(),
            adj.unit()
        );
    }
    Ok(())
}
