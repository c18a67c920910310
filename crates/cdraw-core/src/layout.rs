//! Placement arithmetic for the combinators.
//!
//! Each function takes the sizes of two children and returns the size of
//! the output canvas together with the offset of each child. Nothing here
//! allocates or paints; the [`Compositor`](crate::Compositor) turns a
//! [`Placement`] into provider calls.
//!
//! # Rounding
//!
//! A centered child sits at `floor((outer - inner) / 2)`. When the leftover
//! space is odd the extra pixel goes after the child (below it, or to its
//! right).

use cdraw_common::{Align, Anchor, Axis};

use crate::error::CompositeError;
use crate::geometry::{Offset, Size};

/// Output canvas size and child offsets for a two-child composite.
///
/// `first` is painted before `second`, so `second` wins wherever the two
/// footprints overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Size of the output canvas.
    pub size: Size,
    /// Offset of the child painted first.
    pub first: Offset,
    /// Offset of the child painted second.
    pub second: Offset,
}

/// Place `left` and `right` side by side.
///
/// The canvas is as wide as both children together and as tall as the
/// taller one. `align` picks each child's y offset (TOP, BOTTOM, or
/// CENTER/MIDDLE; anything else centers).
///
/// # Errors
///
/// Returns [`CompositeError::DimensionOverflow`] if the combined width is
/// too large.
pub fn beside(left: Size, right: Size, align: Align) -> Result<Placement, CompositeError> {
    let size = Size::checked(
        u64::from(left.width) + u64::from(right.width),
        u64::from(left.height.max(right.height)),
    )?;
    let anchor = align.anchor(Axis::Vertical);

    Ok(Placement {
        size,
        first: Offset::new(0, anchor.offset(size.height, left.height)),
        second: Offset::new(left.width, anchor.offset(size.height, right.height)),
    })
}

/// Stack `top` above `bottom`.
///
/// The canvas is as tall as both children together and as wide as the
/// wider one. `align` picks each child's x offset (LEFT, RIGHT, or
/// CENTER/MIDDLE; anything else centers).
///
/// # Errors
///
/// Returns [`CompositeError::DimensionOverflow`] if the combined height is
/// too large.
pub fn above(top: Size, bottom: Size, align: Align) -> Result<Placement, CompositeError> {
    let size = Size::checked(
        u64::from(top.width.max(bottom.width)),
        u64::from(top.height) + u64::from(bottom.height),
    )?;
    let anchor = align.anchor(Axis::Horizontal);

    Ok(Placement {
        size,
        first: Offset::new(anchor.offset(size.width, top.width), 0),
        second: Offset::new(anchor.offset(size.width, bottom.width), top.height),
    })
}

/// Center `front` over `back`.
///
/// The canvas grows to the larger extent on each axis independently, so
/// neither child has to contain the other.
///
/// # Errors
///
/// Never fails for sizes that were themselves valid; the `Result` keeps the
/// signature in line with the other combinators.
pub fn overlay(back: Size, front: Size) -> Result<Placement, CompositeError> {
    let size = Size::checked(
        u64::from(back.width.max(front.width)),
        u64::from(back.height.max(front.height)),
    )?;

    Ok(Placement {
        size,
        first: centered(size, back),
        second: centered(size, front),
    })
}

fn centered(outer: Size, inner: Size) -> Offset {
    Offset::new(
        Anchor::Center.offset(outer.width, inner.width),
        Anchor::Center.offset(outer.height, inner.height),
    )
}
