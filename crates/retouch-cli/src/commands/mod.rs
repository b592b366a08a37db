//! CLI command implementations

pub mod adjust;
pub mod params;
pub mod stats;

use anyhow::{bail, Context, Result};
use retouch_core::raw::{read_raw, write_raw};
use retouch_core::{PixelBuffer, RawLayout};
use std::path::Path;

use crate::RawInput;

/// Parses a layout name (`rgba`, `rgb`, `gray`).
pub fn parse_layout(name: &str) -> Result<RawLayout> {
    name.parse::<RawLayout>()
        .with_context(|| format!("Unknown layout: {}", name))
}

/// Load a raw image described by `raw`
pub fn load_raw(raw: &RawInput) -> Result<PixelBuffer> {
    let layout = parse_layout(&raw.layout)?;
    read_raw(&raw.input, raw.width, raw.height, layout)
        .with_context(|| format!("Failed to load: {}", raw.input.display()))
}

/// Save a buffer as raw bytes
pub fn save_raw(path: &Path, buffer: &PixelBuffer, layout: RawLayout) -> Result<()> {
    write_raw(path, buffer, layout)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parses `WxH` (also accepts `W,H` and `W:H`).
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let parts: Vec<&str> = s.split(['x', 'X', ',', ':']).collect();
    if parts.len() != 2 {
        bail!("Expected WxH, got '{}'", s);
    }
    let w: u32 = parts[0].trim().parse().with_context(|| format!("Bad width in '{}'", s))?;
    let h: u32 = parts[1].trim().parse().with_context(|| format!("Bad height in '{}'", s))?;
    if w == 0 || h == 0 {
        bail!("Size must be non-zero: '{}'", s);
    }
    Ok((w, h))
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("1200x800").unwrap(), (1200, 800));
        assert_eq!(parse_size("64,32").unwrap(), (64, 32));
        assert!(parse_size("0x5").is_err());
        assert!(parse_size("12").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn test_parse_layout() {
        assert_eq!(parse_layout("rgb").unwrap(), RawLayout::Rgb);
        assert!(parse_layout("cmyk").is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.00 MB");
    }
}
