//! Integer pixel geometry.

use crate::error::CompositeError;

/// Largest width or height any surface may have.
///
/// Offsets are handed to backends as signed 32-bit coordinates, so every
/// dimension has to fit in an `i32`.
#[allow(clippy::cast_sign_loss)]
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Width and height of a surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// A zero-area size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Build a size from unsigned components.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Validate the signed dimensions accepted by the public API.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::InvalidDimensions`] if either component is
    /// negative.
    pub fn from_signed(width: i32, height: i32) -> Result<Self, CompositeError> {
        match (u32::try_from(width), u32::try_from(height)) {
            (Ok(width), Ok(height)) => Ok(Self { width, height }),
            _ => Err(CompositeError::InvalidDimensions {
                width: i64::from(width),
                height: i64::from(height),
            }),
        }
    }

    /// Validate an intermediate size computed in 64-bit arithmetic.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError::DimensionOverflow`] if either component is
    /// larger than [`MAX_DIMENSION`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn checked(width: u64, height: u64) -> Result<Self, CompositeError> {
        let limit = u64::from(MAX_DIMENSION);
        if width > limit || height > limit {
            return Err(CompositeError::DimensionOverflow {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }
        // Both components were just bounded by MAX_DIMENSION.
        Ok(Self::new(width as u32, height as u32))
    }

    /// Whether the size covers no pixels.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of pixels covered.
    #[must_use]
    pub const fn area(self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// The rectangle at the origin with this size.
    #[must_use]
    pub const fn to_rect(self) -> PixelRect {
        PixelRect::new(0, 0, self.width, self.height)
    }
}

/// Position of a child's top-left corner inside its parent canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Offset {
    /// Horizontal offset in pixels.
    pub x: u32,
    /// Vertical offset in pixels.
    pub y: u32,
}

impl Offset {
    /// The canvas origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Build an offset.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelRect {
    /// Build a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether the rectangle covers no pixels.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Clip the rectangle to a canvas of `size`.
    #[must_use]
    pub fn clip_to(&self, size: Size) -> Self {
        let x = self.x.min(size.width);
        let y = self.y.min(size.height);
        let right = self.x.saturating_add(self.width).min(size.width);
        let bottom = self.y.saturating_add(self.height).min(size.height);
        Self::new(x, y, right - x, bottom - y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_signed_rejects_negative() {
        assert_eq!(
            Size::from_signed(-1, 4),
            Err(CompositeError::InvalidDimensions {
                width: -1,
                height: 4
            })
        );
        assert_eq!(Size::from_signed(0, 0), Ok(Size::ZERO));
    }

    #[test]
    fn test_checked_rejects_oversized() {
        let too_wide = u64::from(MAX_DIMENSION) + 1;
        assert!(matches!(
            Size::checked(too_wide, 1),
            Err(CompositeError::DimensionOverflow { .. })
        ));
        assert_eq!(Size::checked(3, 4), Ok(Size::new(3, 4)));
    }

    #[test]
    fn test_clip_to_trims_overhang() {
        let rect = PixelRect::new(8, 2, 10, 10);
        assert_eq!(rect.clip_to(Size::new(12, 5)), PixelRect::new(8, 2, 4, 3));
    }

    #[test]
    fn test_clip_to_outside_is_empty() {
        let rect = PixelRect::new(20, 20, 5, 5);
        assert!(rect.clip_to(Size::new(10, 10)).is_empty());
    }
}
