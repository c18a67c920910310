//! Common value types for cdraw.
//!
//! This crate provides the vocabulary shared by every layer of the library:
//! - **Colors** - opaque RGB fill colors and straight-alpha pixel values
//! - **Alignment** - the placement rule used by the `beside`/`above` combinators
//! - **Warning System** - colored, deduplicated diagnostics on stderr

/// Cross-axis alignment for the layout combinators.
pub mod align;
/// Fill colors and pixel values.
pub mod color;
/// Deduplicated warnings with colored terminal output.
pub mod warning;

pub use align::{Align, Anchor, Axis};
pub use color::{Color, Rgba};
pub use warning::{clear_warnings, has_warned, warn_once};
