//! Raster backend for cdraw.
//!
//! # Scope
//!
//! This crate provides:
//! - **Raster provider** - [`RasterProvider`], a `SurfaceProvider` over
//!   premultiplied `tiny-skia` pixmaps
//! - **Fonts** - [`FontBook`], a registry of `fontdue` faces by family and style
//! - **Export** - PNG encoding of finished surfaces through the `image` crate
//!
//! ```no_run
//! use cdraw_core::{Color, Compositor};
//! use cdraw_raster::{FontBook, RasterProvider, save_png};
//!
//! # fn main() -> anyhow::Result<()> {
//! let compositor = Compositor::new(RasterProvider::new(FontBook::system()));
//! let red = compositor.rectangle(10, 20, Color::RED)?;
//! let green = compositor.rectangle(5, 30, Color::GREEN)?;
//! let row = compositor.beside(&red, &green)?;
//! save_png(&row, std::path::Path::new("row.png"))?;
//! # Ok(())
//! # }
//! ```

/// PNG export of raster surfaces.
pub mod export;
/// Font face registry.
pub mod fonts;
/// The tiny-skia surface provider.
pub mod provider;

pub use export::{save_png, to_rgba_image};
pub use fonts::{FONT_ENV, FontBook, FontLoadError};
pub use provider::{RasterCanvas, RasterProvider};
