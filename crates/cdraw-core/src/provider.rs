//! The backend capability the compositor is built on.
//!
//! A [`SurfaceProvider`] owns everything pixel-level: canvas storage,
//! solid fills, blits, and text. The compositor only decides *where* things
//! go. One implementation exists per backend; `MemoryProvider` in this crate
//! is the dependency-free one used by tests.

use cdraw_common::{Color, Rgba};
use strum_macros::Display;

use crate::error::{CompositeError, ProviderError};
use crate::geometry::{Offset, PixelRect, Size};

/// Pixel backend used by the [`Compositor`](crate::Compositor).
///
/// Text goes through two separate calls: [`measure_text`] sizes the string
/// without painting anything, and the compositor allocates the real canvas
/// from that result before calling [`paint_text`].
///
/// [`measure_text`]: SurfaceProvider::measure_text
/// [`paint_text`]: SurfaceProvider::paint_text
pub trait SurfaceProvider {
    /// Backend-specific pixel storage.
    type Canvas;

    /// Allocate a fully transparent canvas of `size`.
    ///
    /// Zero-area sizes must succeed.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::AllocationFailed`] if the backend cannot
    /// provide the storage.
    fn allocate(&self, size: Size) -> Result<Self::Canvas, ProviderError>;

    /// Paint `rect` (clipped to the canvas) with the opaque `color`.
    fn fill_solid(&self, canvas: &mut Self::Canvas, rect: PixelRect, color: Color);

    /// Composite all of `source` onto `dest` with its top-left corner at
    /// `at`, source-over, clipped to `dest`.
    fn blit(&self, source: &Self::Canvas, dest: &mut Self::Canvas, at: Offset);

    /// Measure `text` in `font` without painting anything.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::FontResolution`] if no face matches the
    /// font's family.
    fn measure_text(&self, font: &FontDescriptor, text: &str) -> Result<TextMetrics, ProviderError>;

    /// Paint `text` in `font` and `color`, starting at `origin_x` with the
    /// baseline at `baseline_y`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::FontResolution`] if no face matches the
    /// font's family.
    fn paint_text(
        &self,
        canvas: &mut Self::Canvas,
        origin_x: f32,
        baseline_y: f32,
        text: &str,
        font: &FontDescriptor,
        color: Color,
    ) -> Result<(), ProviderError>;

    /// Width of `canvas` in pixels.
    fn raw_width(&self, canvas: &Self::Canvas) -> u32;

    /// Height of `canvas` in pixels.
    fn raw_height(&self, canvas: &Self::Canvas) -> u32;

    /// Read back one pixel, or `None` outside the canvas.
    fn read_pixel(&self, canvas: &Self::Canvas, x: u32, y: u32) -> Option<Rgba>;

    /// Release the canvas' storage.
    fn release(&self, canvas: Self::Canvas) {
        drop(canvas);
    }
}

/// Which of the four faces of a family to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum FontStyle {
    /// Upright, normal weight.
    Regular,
    /// Upright, bold weight.
    Bold,
    /// Slanted, normal weight.
    Italic,
    /// Slanted, bold weight.
    BoldItalic,
}

impl FontStyle {
    /// Pick the face from the `bold` and `italic` flags of the public API.
    #[must_use]
    pub const fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Self::Regular,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (true, true) => Self::BoldItalic,
        }
    }
}

/// Everything needed to select a face and size it.
///
/// Consumed by a single `text` call and not retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontDescriptor {
    /// Family name, e.g. `"DejaVu Sans"`. Empty selects the default family.
    pub family: String,
    /// Size in points; one point is one pixel on every backend.
    pub point_size: u32,
    /// Weight and slant.
    pub style: FontStyle,
}

impl FontDescriptor {
    /// Build a descriptor from the flags of the public API.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::InvalidFontSize`] if `point_size` is zero
    /// or negative.
    pub fn new(
        family: &str,
        point_size: i32,
        bold: bool,
        italic: bool,
    ) -> Result<Self, CompositeError> {
        let size = u32::try_from(point_size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or(CompositeError::InvalidFontSize(point_size))?;
        Ok(Self {
            family: family.to_string(),
            point_size: size,
            style: FontStyle::from_flags(bold, italic),
        })
    }

    /// Point size as the `f32` pixel size rasterizers expect.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn px(&self) -> f32 {
        self.point_size as f32
    }
}

/// Result of measuring a string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Horizontal distance the pen moves across the whole string.
    pub advance_width: f32,
    /// Distance from the top of the line to the baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the line (positive).
    pub descent: f32,
}

impl TextMetrics {
    /// Canvas size needed to hold the text: advance × (ascent + descent),
    /// each truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::DimensionOverflow`] for metrics that do not
    /// fit a canvas.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn canvas_size(&self) -> Result<Size, CompositeError> {
        let width = self.advance_width.max(0.0).trunc() as u64;
        let height = (self.ascent + self.descent).max(0.0).trunc() as u64;
        Size::checked(width, height)
    }
}
