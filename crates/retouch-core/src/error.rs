//! Error types for retouch-core operations.
//!
//! This module provides the error type shared by every buffer-level
//! operation: construction, pixel access and raw byte conversion.
//!
//! # Overview
//!
//! The [`Error`] enum covers all failure modes that can occur during:
//! - Pixel buffer construction (zero dimensions, byte count mismatch)
//! - Pixel access (bounds checking)
//! - Raw byte adapters (unknown layouts, file I/O)
//!
//! Dimension and channel errors together form the "invalid buffer" class:
//! they are fatal to an adjustment call and no partial output is produced.
//! See [`Error::is_invalid_buffer`].
//!
//! # Usage
//!
//! ```rust
//! use retouch_core::{Error, Result};
//!
//! fn check_pixel(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during pixel buffer operations.
///
/// # Categories
///
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds)
/// - **Invalid buffer errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`ChannelMismatch`](Error::ChannelMismatch)
/// - **Adapter errors**: [`UnsupportedLayout`](Error::UnsupportedLayout), [`Io`](Error::Io)
#[derive(Debug, Error)]
pub enum Error {
    /// Pixel coordinates are outside image bounds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use retouch_core::Error;
    ///
    /// let err = Error::out_of_bounds(100, 50, 80, 60);
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    ///
    /// Returned when width or height is zero, when the buffer size would
    /// overflow, or when the byte count does not describe the image.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Channel count mismatch.
    ///
    /// Returned when the data holds a whole number of samples per pixel,
    /// but not the expected number (e.g. RGB data passed where RGBA was
    /// expected).
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Expected channel count
        expected: u8,
        /// Actual channel count
        got: u8,
    },

    /// Raw byte layout name was not recognised.
    #[error("unsupported raw layout: {layout}")]
    UnsupportedLayout {
        /// Layout name or description
        layout: String,
    },

    /// I/O error while reading or writing raw pixel files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::ChannelMismatch`] error.
    #[inline]
    pub fn channel_mismatch(expected: u8, got: u8) -> Self {
        Self::ChannelMismatch { expected, got }
    }

    /// Creates an [`Error::UnsupportedLayout`] error.
    #[inline]
    pub fn unsupported_layout(layout: impl Into<String>) -> Self {
        Self::UnsupportedLayout {
            layout: layout.into(),
        }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this error means the buffer itself is unusable.
    ///
    /// Zero-area images and channel-count mismatches fall in this class.
    #[inline]
    pub fn is_invalid_buffer(&self) -> bool {
        matches!(
            self,
            Self::InvalidDimensions { .. } | Self::ChannelMismatch { .. }
        )
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if this is an I/O error.
    #[inline]
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}
