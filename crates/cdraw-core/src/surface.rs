//! Owning surface handles.

use crate::geometry::Size;

/// An immutable rectangular canvas produced by a [`Compositor`](crate::Compositor).
///
/// A surface owns its backend canvas outright. It cannot be cloned, and
/// giving it to [`Compositor::dispose`](crate::Compositor::dispose) moves it,
/// so a released canvas can never be used or released again. A surface
/// that simply goes out of scope frees its canvas through the canvas' own
/// `Drop`.
///
/// The advertised size is fixed at construction and always matches the
/// canvas.
#[derive(Debug)]
pub struct Surface<C> {
    canvas: C,
    size: Size,
}

impl<C> Surface<C> {
    pub(crate) const fn new(canvas: C, size: Size) -> Self {
        Self { canvas, size }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size.height
    }

    /// Width and height together.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The backend canvas, for read-only access such as export.
    #[must_use]
    pub const fn canvas(&self) -> &C {
        &self.canvas
    }

    pub(crate) fn into_canvas(self) -> C {
        self.canvas
    }
}
