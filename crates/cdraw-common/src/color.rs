//! Colors at the API boundary and pixels read back from surfaces.
//!
//! User-specified colors are always opaque RGB. Surfaces may still carry
//! alpha (empty canvases are transparent, text is anti-aliased), so pixel
//! read-back uses [`Rgba`].

/// An opaque RGB color with three independent 8-bit channels.
///
/// `#[repr(C)]` so it can be passed by value across the C API exactly like
/// the `cdraw_color_t` struct in `cdraw.h`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel (0-255).
    pub r: u8,
    /// Green channel (0-255).
    pub g: u8,
    /// Blue channel (0-255).
    pub b: u8,
}

impl Color {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Red (#ff0000)
    pub const RED: Self = Self::rgb(255, 0, 0);

    /// Green (#00ff00)
    pub const GREEN: Self = Self::rgb(0, 255, 0);

    /// Blue (#0000ff)
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Build a color from its three channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
    ///
    /// The three-digit form is expanded by replicating digits, so `#f80`
    /// is `#ff8800`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
                let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
                let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
                Some(Self { r, g, b })
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self { r, g, b })
            }
            _ => None,
        }
    }
}

/// A straight (non-premultiplied) RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    /// Red channel (0-255).
    pub r: u8,
    /// Green channel (0-255).
    pub g: u8,
    /// Blue channel (0-255).
    pub b: u8,
    /// Alpha channel (0 = fully transparent, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black, the content of a freshly allocated canvas.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Build a pixel from its four channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Whether this pixel is fully transparent.
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Composite `self` over `dst` (Porter-Duff source-over).
    ///
    /// Exact when the source is fully opaque or fully transparent; partial
    /// alpha is rounded to the nearest channel value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn over(self, dst: Self) -> Self {
        let sa = u32::from(self.a);
        let da = u32::from(dst.a);
        if sa == 255 || da == 0 {
            return self;
        }
        if sa == 0 {
            return dst;
        }

        let inv = 255 - sa;
        let out_a = sa + (da * inv + 127) / 255;
        let denom = out_a * 255;
        let channel = |s: u8, d: u8| {
            let num = u32::from(s) * sa * 255 + u32::from(d) * da * inv;
            ((num + denom / 2) / denom).min(255) as u8
        };

        Self {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: out_a.min(255) as u8,
        }
    }
}

impl From<Color> for Rgba {
    fn from(color: Color) -> Self {
        Self::new(color.r, color.g, color.b, 255)
    }
}
