//! Error types for monomatch.

use thiserror::Error;

/// Result alias for monomatch operations.
pub type MonoMatchResult<T> = std::result::Result<T, MonoMatchError>;

/// Errors that can occur while building masks or loading sources.
///
/// The search itself never fails: a missing source or an impossible
/// placement is reported as "no match".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MonoMatchError {
    /// The haystack or needle source is absent.
    #[error("invalid source: {0}")]
    InvalidSource(&'static str),
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than one row of pixels.
    #[error("stride {stride} is too small for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer cannot hold the declared image.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Image decoding or file access failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
