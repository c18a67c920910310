//! Raster [`SurfaceProvider`] over `tiny-skia` pixmaps.
//!
//! Canvases store premultiplied RGBA. Solid fills and blits go through
//! `tiny-skia`; text is rasterized glyph by glyph with `fontdue` and the
//! coverage is blended straight into the pixmap.

use cdraw_common::{Color, Rgba};
use cdraw_core::{
    FontDescriptor, Offset, PixelRect, ProviderError, Size, SurfaceProvider, TextMetrics,
};
use fontdue::Font;
use tiny_skia::{Paint, Pixmap, PixmapPaint, PremultipliedColorU8, Rect, Transform};

use crate::fonts::FontBook;

/// Ascent used when a face has no horizontal line metrics, per pixel of size.
const FALLBACK_ASCENT: f32 = 0.8;

/// Descent used when a face has no horizontal line metrics, per pixel of size.
const FALLBACK_DESCENT: f32 = 0.2;

/// Pixel storage of the raster backend.
///
/// Zero-area canvases carry no pixmap, since `tiny-skia` cannot allocate one.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    size: Size,
    pixmap: Option<Pixmap>,
}

impl RasterCanvas {
    /// Size of the canvas.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// The backing pixmap, or `None` for a zero-area canvas.
    #[must_use]
    pub const fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }
}

/// Draws with `tiny-skia` and renders text from a [`FontBook`].
#[derive(Debug, Clone)]
pub struct RasterProvider {
    fonts: FontBook,
}

impl RasterProvider {
    /// Create a provider that renders text from `fonts`.
    #[must_use]
    pub const fn new(fonts: FontBook) -> Self {
        Self { fonts }
    }

    fn face(&self, font: &FontDescriptor) -> Result<&Font, ProviderError> {
        self.fonts.resolve(&font.family, font.style)
    }
}

impl SurfaceProvider for RasterProvider {
    type Canvas = RasterCanvas;

    fn allocate(&self, size: Size) -> Result<RasterCanvas, ProviderError> {
        if size.is_empty() {
            return Ok(RasterCanvas { size, pixmap: None });
        }
        let pixmap = Pixmap::new(size.width, size.height).ok_or(ProviderError::AllocationFailed {
            width: size.width,
            height: size.height,
        })?;
        Ok(RasterCanvas {
            size,
            pixmap: Some(pixmap),
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn fill_solid(&self, canvas: &mut RasterCanvas, rect: PixelRect, color: Color) {
        let rect = rect.clip_to(canvas.size);
        let Some(pixmap) = canvas.pixmap.as_mut() else {
            return;
        };
        let Some(area) = Rect::from_xywh(
            rect.x as f32,
            rect.y as f32,
            rect.width as f32,
            rect.height as f32,
        ) else {
            return;
        };
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, 255);
        paint.anti_alias = false;
        pixmap.fill_rect(area, &paint, Transform::identity(), None);
    }

    fn blit(&self, source: &RasterCanvas, dest: &mut RasterCanvas, at: Offset) {
        let (Some(src), Some(dst)) = (source.pixmap.as_ref(), dest.pixmap.as_mut()) else {
            return;
        };
        let (Ok(x), Ok(y)) = (i32::try_from(at.x), i32::try_from(at.y)) else {
            return;
        };
        dst.draw_pixmap(
            x,
            y,
            src.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    fn measure_text(&self, font: &FontDescriptor, text: &str) -> Result<TextMetrics, ProviderError> {
        let face = self.face(font)?;
        let px = font.px();
        let advance_width = text
            .chars()
            .filter(|ch| !ch.is_control())
            .map(|ch| face.metrics(ch, px).advance_width)
            .sum::<f32>();
        let (ascent, descent) = face.horizontal_line_metrics(px).map_or(
            (px * FALLBACK_ASCENT, px * FALLBACK_DESCENT),
            // fontdue reports descent below the baseline as negative.
            |line| (line.ascent, -line.descent),
        );
        Ok(TextMetrics {
            advance_width,
            ascent,
            descent,
        })
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn paint_text(
        &self,
        canvas: &mut RasterCanvas,
        origin_x: f32,
        baseline_y: f32,
        text: &str,
        font: &FontDescriptor,
        color: Color,
    ) -> Result<(), ProviderError> {
        let face = self.face(font)?;
        let Some(pixmap) = canvas.pixmap.as_mut() else {
            return Ok(());
        };
        let px = font.px();
        let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);
        let pixels = pixmap.pixels_mut();
        let baseline = baseline_y.round() as i32;

        let mut pen = origin_x;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let (metrics, coverage) = face.rasterize(ch, px);
            let left = pen.round() as i32 + metrics.xmin;
            let top = baseline - metrics.ymin - metrics.height as i32;

            for (gy, row) in coverage.chunks(metrics.width.max(1)).enumerate() {
                let y = top + gy as i32;
                if y < 0 || y >= height {
                    continue;
                }
                for (gx, &alpha) in row.iter().enumerate() {
                    let x = left + gx as i32;
                    if alpha == 0 || x < 0 || x >= width {
                        continue;
                    }
                    let index = y as usize * width as usize + x as usize;
                    pixels[index] = blend_coverage(color, alpha, pixels[index]);
                }
            }
            pen += metrics.advance_width;
        }
        Ok(())
    }

    fn raw_width(&self, canvas: &RasterCanvas) -> u32 {
        canvas.pixmap.as_ref().map_or(canvas.size.width, Pixmap::width)
    }

    fn raw_height(&self, canvas: &RasterCanvas) -> u32 {
        canvas
            .pixmap
            .as_ref()
            .map_or(canvas.size.height, Pixmap::height)
    }

    fn read_pixel(&self, canvas: &RasterCanvas, x: u32, y: u32) -> Option<Rgba> {
        let pixel = canvas.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Rgba::new(
            pixel.red(),
            pixel.green(),
            pixel.blue(),
            pixel.alpha(),
        ))
    }
}

/// `x * a / 255`, rounded.
#[allow(clippy::cast_possible_truncation)]
fn scale(x: u8, a: u8) -> u8 {
    ((u16::from(x) * u16::from(a) + 127) / 255) as u8
}

/// Source-over of `color` at `alpha` coverage onto a premultiplied pixel.
fn blend_coverage(color: Color, alpha: u8, dst: PremultipliedColorU8) -> PremultipliedColorU8 {
    let inverse = 255 - alpha;
    let channel = |src: u8, under: u8| scale(src, alpha).saturating_add(scale(under, inverse));
    PremultipliedColorU8::from_rgba(
        channel(color.r, dst.red()),
        channel(color.g, dst.green()),
        channel(color.b, dst.blue()),
        alpha.saturating_add(scale(dst.alpha(), inverse)),
    )
    .unwrap_or(dst)
}
