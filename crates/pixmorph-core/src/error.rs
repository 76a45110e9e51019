//! Error types shared by every filter.

use thiserror::Error;

/// Errors reported by raster construction and filter entry points.
///
/// Every check runs before any pixel work begins, so a returned error means
/// no output raster was allocated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// Two rasters that must share a size do not.
    #[error("Incompatible dimensions: expected {expected:?}, got {actual:?}")]
    IncompatibleDimensions {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// A raster must be at least 1x1.
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// A pixel buffer does not hold exactly width * height pixels.
    #[error("Pixel buffer size mismatch: expected {expected}, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A filter parameter is outside its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FilterError>;
