//! Alignment of a child along the cross axis of a combinator.
//!
//! `beside` lays children out left to right and positions each one
//! vertically; `above` lays them out top to bottom and positions each one
//! horizontally. An [`Align`] value is interpreted against that cross
//! [`Axis`] and reduced to an [`Anchor`].

use strum_macros::{Display, EnumIter, FromRepr};

/// Alignment names accepted by the combinators.
///
/// The discriminants match `cdraw_align_t` in `cdraw.h`.
///
/// `MIDDLE` and `CENTER` are aliases: both resolve to [`Anchor::Center`] on
/// either axis.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter, FromRepr)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Align {
    /// Flush with the top edge (vertical axis).
    Top = 0,
    /// Flush with the bottom edge (vertical axis).
    Bottom = 1,
    /// Synonym for [`Align::Center`].
    Middle = 2,
    /// Centered on either axis.
    #[default]
    Center = 3,
    /// Flush with the left edge (horizontal axis).
    Left = 4,
    /// Flush with the right edge (horizontal axis).
    Right = 5,
}

/// The axis along which a child's offset is being chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Axis {
    /// Choosing an x offset (used by `above`).
    Horizontal,
    /// Choosing a y offset (used by `beside`).
    Vertical,
}

/// Where a child sits inside the space available on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Offset 0.
    Start,
    /// Half of the leftover space, rounded down.
    Center,
    /// All of the leftover space; the child's far edge touches the canvas edge.
    End,
}

impl Align {
    /// Whether this alignment names a position on `axis`.
    ///
    /// `MIDDLE` and `CENTER` apply to both axes.
    #[must_use]
    pub const fn applies_to(self, axis: Axis) -> bool {
        match self {
            Self::Middle | Self::Center => true,
            Self::Top | Self::Bottom => matches!(axis, Axis::Vertical),
            Self::Left | Self::Right => matches!(axis, Axis::Horizontal),
        }
    }

    /// Reduce this alignment to an anchor on `axis`.
    ///
    /// Alignments that do not apply to `axis` fall back to
    /// [`Anchor::Center`].
    #[must_use]
    pub const fn anchor(self, axis: Axis) -> Anchor {
        match (self, axis) {
            (Self::Top, Axis::Vertical) | (Self::Left, Axis::Horizontal) => Anchor::Start,
            (Self::Bottom, Axis::Vertical) | (Self::Right, Axis::Horizontal) => Anchor::End,
            _ => Anchor::Center,
        }
    }
}

impl Anchor {
    /// Offset of a child of length `inner` inside a span of length `outer`.
    ///
    /// `inner` must not exceed `outer`; a larger child is pinned at 0.
    #[must_use]
    pub const fn offset(self, outer: u32, inner: u32) -> u32 {
        let slack = outer.saturating_sub(inner);
        match self {
            Self::Start => 0,
            Self::Center => slack / 2,
            Self::End => slack,
        }
    }
}
