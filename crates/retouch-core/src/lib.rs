//! # retouch-core
//!
//! Core types for raster image adjustment.
//!
//! This crate provides the foundational types used throughout the retouch
//! workspace:
//!
//! - [`PixelBuffer`] - Owned, row-major, interleaved RGBA8 image
//! - [`Channel`], [`clamp_channel`] - Channel addressing and the final byte clamp
//! - [`raw`] - Headerless raw byte adapters (gray / RGB / RGBA)
//! - [`Error`] - Buffer-level error type
//!
//! ## Crate Structure
//!
//! ```text
//! retouch-core (this crate)
//!    ^
//!    |
//!    +-- retouch-ops (color math, blur, adjustment pipeline)
//!    +-- retouch-cli (command line front end)
//! ```
//!
//! Nothing here knows about compressed image formats: decoding and encoding
//! happen outside, and hand over plain pixel bytes.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod pixel;
pub mod raw;

// Re-exports for convenience
pub use buffer::PixelBuffer;
pub use error::{Error, Result};
pub use pixel::{clamp_channel, Channel, ChannelStats, ChannelSummary, Rgba8, CHANNELS};
pub use raw::RawLayout;

/// Prelude module for convenient imports.
///
/// ```
/// use retouch_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::buffer::PixelBuffer;
    pub use crate::error::{Error, Result};
    pub use crate::pixel::{clamp_channel, Channel, Rgba8, CHANNELS};
    pub use crate::raw::{decode_raw, encode_raw, RawLayout};
}
