//! Declarative image compositing for cdraw.
//!
//! # Scope
//!
//! This crate implements:
//! - **Leaf constructors** - filled rectangles, squares, empty placeholders, rendered text
//! - **Combinators** - `beside`, `above` (with cross-axis alignment) and centered `overlay`
//! - **Layout arithmetic** - output canvas size and per-child offsets, as pure functions
//! - **Surface ownership** - move-only [`Surface`] handles released exactly once
//! - **Memory backend** - [`MemoryProvider`], a dependency-free provider for tests
//!
//! Pixel storage, blitting, and text rasterization are delegated to a
//! [`SurfaceProvider`]. The production provider lives in `cdraw-raster`.
//!
//! ```text
//! rectangle / text ──► provider.allocate + fill/paint ──► Surface
//! beside / above / overlay ──► layout::* ──► provider.allocate + 2 × blit ──► Surface
//! ```
//!
//! Every composite is computed eagerly and produces a new immutable surface.
//! Combinators borrow their inputs; the caller keeps ownership of every
//! surface it created.

/// The compositor: leaf constructors, combinators, and accessors.
pub mod compositor;
/// Error taxonomy for compositing and providers.
pub mod error;
/// Sizes, offsets, and rectangles in integer pixel space.
pub mod geometry;
/// Pure placement arithmetic for the combinators.
pub mod layout;
/// In-memory provider with a deterministic font model.
pub mod memory;
/// The backend capability the compositor is built on.
pub mod provider;
/// Owning surface handles.
pub mod surface;

pub use cdraw_common::{Align, Anchor, Axis, Color, Rgba};
pub use compositor::Compositor;
pub use error::{CompositeError, ProviderError};
pub use geometry::{MAX_DIMENSION, Offset, PixelRect, Size};
pub use layout::Placement;
pub use memory::{MemoryCanvas, MemoryProvider};
pub use provider::{FontDescriptor, FontStyle, SurfaceProvider, TextMetrics};
pub use surface::Surface;
