//! Errors produced while building surfaces.
//!
//! There are no transient failures here: every error is a deterministic
//! consequence of the inputs (or of the backend being unable to satisfy
//! them), so nothing is worth retrying.

use crate::provider::FontStyle;
use thiserror::Error;

/// Failure reported by a [`SurfaceProvider`](crate::SurfaceProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The backend could not allocate a canvas of the requested size.
    #[error("backend could not allocate a {width}x{height} canvas")]
    AllocationFailed {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// No font face matches the requested family.
    #[error("no font face matches family '{family}' ({style})")]
    FontResolution {
        /// Requested family name, as given by the caller.
        family: String,
        /// Requested style.
        style: FontStyle,
    },

    /// Any other backend-specific failure.
    #[error("backend error: {0}")]
    Backend(String),
}

/// Failure of a compositor operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositeError {
    /// A leaf constructor was given a negative width or height.
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: i64,
        /// Requested height.
        height: i64,
    },

    /// The output canvas would not be addressable with 32-bit signed offsets.
    #[error("surface of {width}x{height} exceeds the {max}px dimension limit")]
    DimensionOverflow {
        /// Width the operation would have produced.
        width: u64,
        /// Height the operation would have produced.
        height: u64,
        /// Largest allowed dimension.
        max: u32,
    },

    /// Text was requested at a point size of zero or below.
    #[error("invalid font size {0}")]
    InvalidFontSize(i32),

    /// The provider failed.
    #[error(transparent)]
    Provider(#[from] ProviderError),
}
