//! The compositor: leaf constructors, combinators, and accessors.
//!
//! Every operation is synchronous and eager. Leaf constructors allocate a
//! canvas and paint one primitive into it; combinators compute a
//! [`Placement`], allocate the output canvas, and blit both children into
//! it, first child first.
//!
//! The compositor only needs `&self`, so one compositor over a
//! `Send + Sync` provider can serve several threads composing disjoint
//! surfaces.

use cdraw_common::{Align, Axis, Color, Rgba, warn_once};

use crate::error::CompositeError;
use crate::geometry::Size;
use crate::layout::{self, Placement};
use crate::provider::{FontDescriptor, SurfaceProvider};
use crate::surface::Surface;

/// Builds surfaces on top of a [`SurfaceProvider`].
#[derive(Debug, Clone, Default)]
pub struct Compositor<P> {
    provider: P,
}

impl<P: SurfaceProvider> Compositor<P> {
    /// Create a compositor that draws with `provider`.
    #[must_use]
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// The provider this compositor draws with.
    #[must_use]
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// A `width` × `height` surface filled entirely with `color`.
    ///
    /// Zero-width or zero-height rectangles are valid empty surfaces.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::InvalidDimensions`] for negative sizes, or
    /// a provider error if allocation fails.
    pub fn rectangle(
        &self,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<Surface<P::Canvas>, CompositeError> {
        let size = Size::from_signed(width, height)?;
        let mut canvas = self.allocate(size)?;
        self.provider.fill_solid(&mut canvas, size.to_rect(), color);
        Ok(Surface::new(canvas, size))
    }

    /// A `side` × `side` rectangle.
    ///
    /// # Errors
    ///
    /// Same as [`Compositor::rectangle`].
    pub fn square(&self, side: i32, color: Color) -> Result<Surface<P::Canvas>, CompositeError> {
        self.rectangle(side, side, color)
    }

    /// A fully transparent `width` × `height` surface, useful as spacing.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::InvalidDimensions`] for negative sizes, or
    /// a provider error if allocation fails.
    pub fn empty(&self, width: i32, height: i32) -> Result<Surface<P::Canvas>, CompositeError> {
        let size = Size::from_signed(width, height)?;
        let canvas = self.allocate(size)?;
        Ok(Surface::new(canvas, size))
    }

    /// Render `content` on a surface sized exactly to the text.
    ///
    /// The surface is as wide as the string's advance and as tall as the
    /// font's ascent plus descent; the baseline sits `ascent` pixels from
    /// the top. An empty string yields a zero-width surface of full line
    /// height.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::InvalidFontSize`] for `point_size <= 0`,
    /// or [`ProviderError::FontResolution`](crate::ProviderError::FontResolution)
    /// when no face matches `font_family`.
    pub fn text(
        &self,
        content: &str,
        point_size: i32,
        color: Color,
        font_family: &str,
        bold: bool,
        italic: bool,
    ) -> Result<Surface<P::Canvas>, CompositeError> {
        let font = FontDescriptor::new(font_family, point_size, bold, italic)?;
        self.text_with(content, &font, color)
    }

    /// [`Compositor::text`] with an already-built [`FontDescriptor`].
    ///
    /// # Errors
    ///
    /// Returns a provider error when the font cannot be resolved or the
    /// canvas cannot be allocated.
    pub fn text_with(
        &self,
        content: &str,
        font: &FontDescriptor,
        color: Color,
    ) -> Result<Surface<P::Canvas>, CompositeError> {
        // Pass 1: size the string without painting.
        let metrics = self.provider.measure_text(font, content)?;
        let size = metrics.canvas_size()?;

        // Pass 2: paint onto a canvas of exactly that size.
        let mut canvas = self.allocate(size)?;
        self.provider
            .paint_text(&mut canvas, 0.0, metrics.ascent, content, font, color)?;
        Ok(Surface::new(canvas, size))
    }

    /// Place `left` and `right` side by side, aligned vertically by `align`.
    ///
    /// `TOP`, `BOTTOM`, and `CENTER`/`MIDDLE` are meaningful here; `LEFT`
    /// and `RIGHT` are treated as `CENTER` with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::DimensionOverflow`] if the combined width
    /// is too large, or a provider error if allocation fails.
    pub fn beside_align(
        &self,
        left: &Surface<P::Canvas>,
        right: &Surface<P::Canvas>,
        align: Align,
    ) -> Result<Surface<P::Canvas>, CompositeError> {
        warn_cross_axis("beside", align, Axis::Vertical);
        let placement = layout::beside(left.size(), right.size(), align)?;
        self.compose(&placement, left, right)
    }

    /// [`Compositor::beside_align`] with `CENTER`.
    ///
    /// # Errors
    ///
    /// Same as [`Compositor::beside_align`].
    pub fn beside(
        &self,
        left: &Surface<P::Canvas>,
        right: &Surface<P::Canvas>,
    ) -> Result<Surface<P::Canvas>, CompositeError> {
        self.beside_align(left, right, Align::Center)
    }

    /// Stack `top` above `bottom`, aligned horizontally by `align`.
    ///
    /// `LEFT`, `RIGHT`, and `CENTER`/`MIDDLE` are meaningful here; `TOP`
    /// and `BOTTOM` are treated as `CENTER` with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::DimensionOverflow`] if the combined height
    /// is too large, or a provider error if allocation fails.
    pub fn above_align(
        &self,
        top: &Surface<P::Canvas>,
        bottom: &Surface<P::Canvas>,
        align: Align,
    ) -> Result<Surface<P::Canvas>, CompositeError> {
        warn_cross_axis("above", align, Axis::Horizontal);
        let placement = layout::above(top.size(), bottom.size(), align)?;
        self.compose(&placement, top, bottom)
    }

    /// [`Compositor::above_align`] with `CENTER`.
    ///
    /// # Errors
    ///
    /// Same as [`Compositor::above_align`].
    pub fn above(
        &self,
        top: &Surface<P::Canvas>,
        bottom: &Surface<P::Canvas>,
    ) -> Result<Surface<P::Canvas>, CompositeError> {
        self.above_align(top, bottom, Align::Center)
    }

    /// Center `front` over `back`; `front` is painted last and wins where
    /// they overlap.
    ///
    /// The result is as large as the larger input on each axis, so a front
    /// bigger than the back grows the canvas.
    ///
    /// # Errors
    ///
    /// Returns a provider error if allocation fails.
    pub fn overlay(
        &self,
        back: &Surface<P::Canvas>,
        front: &Surface<P::Canvas>,
    ) -> Result<Surface<P::Canvas>, CompositeError> {
        let placement = layout::overlay(back.size(), front.size())?;
        self.compose(&placement, back, front)
    }

    /// Width of `surface` in pixels.
    #[must_use]
    pub const fn width(&self, surface: &Surface<P::Canvas>) -> u32 {
        surface.width()
    }

    /// Height of `surface` in pixels.
    #[must_use]
    pub const fn height(&self, surface: &Surface<P::Canvas>) -> u32 {
        surface.height()
    }

    /// Read back the pixel at `(x, y)`, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, surface: &Surface<P::Canvas>, x: u32, y: u32) -> Option<Rgba> {
        self.provider.read_pixel(surface.canvas(), x, y)
    }

    /// Release `surface` through the provider.
    ///
    /// Taking the surface by value means it cannot be used, or released,
    /// again.
    pub fn dispose(&self, surface: Surface<P::Canvas>) {
        self.provider.release(surface.into_canvas());
    }

    fn allocate(&self, size: Size) -> Result<P::Canvas, CompositeError> {
        let canvas = self.provider.allocate(size)?;
        debug_assert_eq!(
            Size::new(
                self.provider.raw_width(&canvas),
                self.provider.raw_height(&canvas)
            ),
            size,
            "provider allocated a canvas of the wrong size"
        );
        Ok(canvas)
    }

    fn compose(
        &self,
        placement: &Placement,
        first: &Surface<P::Canvas>,
        second: &Surface<P::Canvas>,
    ) -> Result<Surface<P::Canvas>, CompositeError> {
        let mut canvas = self.allocate(placement.size)?;
        self.provider
            .blit(first.canvas(), &mut canvas, placement.first);
        self.provider
            .blit(second.canvas(), &mut canvas, placement.second);
        Ok(Surface::new(canvas, placement.size))
    }
}

fn warn_cross_axis(operation: &str, align: Align, axis: Axis) {
    if !align.applies_to(axis) {
        warn_once(
            "layout",
            &format!("{align} does not apply to {operation}; using CENTER"),
        );
    }
}
