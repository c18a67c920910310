//! In-memory provider with a deterministic font model.
//!
//! Canvases are plain `Vec<Rgba>` buffers in straight alpha. Text is not
//! rasterized from real outlines: every printable glyph is a solid box one
//! advance wide sitting on the baseline, and the metrics are fixed
//! fractions of the point size. That keeps text sizing exact and testable
//! without any font files.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use cdraw_common::{Color, Rgba};

use crate::error::ProviderError;
use crate::geometry::{Offset, PixelRect, Size};
use crate::provider::{FontDescriptor, SurfaceProvider, TextMetrics};

/// Advance of every printable character, as a fraction of the point size.
const ADVANCE_RATIO: f32 = 0.5;

/// Ascent as a fraction of the point size.
const ASCENT_RATIO: f32 = 0.75;

/// Descent as a fraction of the point size.
const DESCENT_RATIO: f32 = 0.25;

/// Families resolved by [`MemoryProvider::new`]. The first is the default.
const DEFAULT_FAMILIES: &[&str] = &["sans-serif", "serif", "monospace"];

/// Dependency-free [`SurfaceProvider`] for tests and headless use.
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    families: Vec<String>,
    live: Arc<AtomicUsize>,
}

impl MemoryProvider {
    /// A provider resolving `sans-serif`, `serif`, and `monospace`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_families(DEFAULT_FAMILIES)
    }

    /// A provider resolving exactly `families` (matched case-insensitively).
    ///
    /// The first family is used when a descriptor names no family.
    #[must_use]
    pub fn with_families(families: &[&str]) -> Self {
        Self {
            families: families.iter().map(|f| f.to_ascii_lowercase()).collect(),
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of canvases allocated by this provider that are still alive.
    #[must_use]
    pub fn live_canvases(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    fn resolve(&self, font: &FontDescriptor) -> Result<(), ProviderError> {
        let wanted = font.family.trim().to_ascii_lowercase();
        let known = if wanted.is_empty() {
            !self.families.is_empty()
        } else {
            self.families.contains(&wanted)
        };
        if known {
            Ok(())
        } else {
            Err(ProviderError::FontResolution {
                family: font.family.clone(),
                style: font.style,
            })
        }
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Decrements the provider's live-canvas count when dropped.
#[derive(Debug)]
struct LiveToken(Arc<AtomicUsize>);

impl LiveToken {
    fn acquire(counter: &Arc<AtomicUsize>) -> Self {
        let _previous = counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        let _previous = self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A straight-alpha pixel buffer, row-major.
#[derive(Debug)]
pub struct MemoryCanvas {
    size: Size,
    pixels: Vec<Rgba>,
    _token: LiveToken,
}

impl MemoryCanvas {
    /// Size of the canvas.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// All pixels, row by row.
    #[must_use]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        usize::try_from(u64::from(y) * u64::from(self.size.width) + u64::from(x)).ok()
    }

    fn fill(&mut self, rect: PixelRect, pixel: Rgba) {
        let rect = rect.clip_to(self.size);
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                if let Some(i) = self.index(x, y) {
                    self.pixels[i] = pixel.over(self.pixels[i]);
                }
            }
        }
    }
}

impl SurfaceProvider for MemoryProvider {
    type Canvas = MemoryCanvas;

    fn allocate(&self, size: Size) -> Result<MemoryCanvas, ProviderError> {
        let failed = ProviderError::AllocationFailed {
            width: size.width,
            height: size.height,
        };
        let len = usize::try_from(size.area()).map_err(|_| failed.clone())?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| failed)?;
        pixels.resize(len, Rgba::TRANSPARENT);
        Ok(MemoryCanvas {
            size,
            pixels,
            _token: LiveToken::acquire(&self.live),
        })
    }

    fn fill_solid(&self, canvas: &mut MemoryCanvas, rect: PixelRect, color: Color) {
        canvas.fill(rect, Rgba::from(color));
    }

    fn blit(&self, source: &MemoryCanvas, dest: &mut MemoryCanvas, at: Offset) {
        let target = PixelRect::new(at.x, at.y, source.size.width, source.size.height)
            .clip_to(dest.size);
        for y in target.y..target.y + target.height {
            for x in target.x..target.x + target.width {
                let (Some(src), Some(dst)) = (source.index(x - at.x, y - at.y), dest.index(x, y))
                else {
                    continue;
                };
                dest.pixels[dst] = source.pixels[src].over(dest.pixels[dst]);
            }
        }
    }

    fn measure_text(&self, font: &FontDescriptor, text: &str) -> Result<TextMetrics, ProviderError> {
        self.resolve(font)?;
        let px = font.px();
        let glyphs = text.chars().filter(|ch| !ch.is_control()).count();
        #[allow(clippy::cast_precision_loss)]
        let advance_width = glyphs as f32 * px * ADVANCE_RATIO;
        Ok(TextMetrics {
            advance_width,
            ascent: px * ASCENT_RATIO,
            descent: px * DESCENT_RATIO,
        })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn paint_text(
        &self,
        canvas: &mut MemoryCanvas,
        origin_x: f32,
        baseline_y: f32,
        text: &str,
        font: &FontDescriptor,
        color: Color,
    ) -> Result<(), ProviderError> {
        self.resolve(font)?;
        let px = font.px();
        let advance = px * ADVANCE_RATIO;
        let top = (baseline_y - px * ASCENT_RATIO).max(0.0).floor() as u32;
        let bottom = baseline_y.max(0.0).floor() as u32;

        let mut pen = origin_x;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            if !ch.is_whitespace() {
                let left = pen.max(0.0).floor() as u32;
                let right = (pen + advance).max(0.0).floor() as u32;
                canvas.fill(
                    PixelRect::new(left, top, right.saturating_sub(left), bottom.saturating_sub(top)),
                    Rgba::from(color),
                );
            }
            pen += advance;
        }
        Ok(())
    }

    fn raw_width(&self, canvas: &MemoryCanvas) -> u32 {
        canvas.size.width
    }

    fn raw_height(&self, canvas: &MemoryCanvas) -> u32 {
        canvas.size.height
    }

    fn read_pixel(&self, canvas: &MemoryCanvas, x: u32, y: u32) -> Option<Rgba> {
        canvas.index(x, y).map(|i| canvas.pixels[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_family_resolves_to_default() {
        let provider = MemoryProvider::new();
        let font = FontDescriptor::new("", 10, false, false).unwrap();
        assert!(provider.measure_text(&font, "x").is_ok());
    }

    #[test]
    fn test_family_lookup_is_case_insensitive() {
        let provider = MemoryProvider::new();
        let font = FontDescriptor::new("MonoSpace", 10, true, true).unwrap();
        assert!(provider.measure_text(&font, "x").is_ok());
    }

    #[test]
    fn test_blit_clips_to_destination() {
        let provider = MemoryProvider::new();
        let mut source = provider.allocate(Size::new(4, 4)).unwrap();
        provider.fill_solid(&mut source, PixelRect::new(0, 0, 4, 4), Color::RED);
        let mut dest = provider.allocate(Size::new(3, 3)).unwrap();
        provider.blit(&source, &mut dest, Offset::new(2, 2));

        assert_eq!(provider.read_pixel(&dest, 2, 2), Some(Rgba::from(Color::RED)));
        assert_eq!(provider.read_pixel(&dest, 1, 1), Some(Rgba::TRANSPARENT));
        assert_eq!(provider.read_pixel(&dest, 3, 3), None);
    }

    #[test]
    fn test_transparent_blit_keeps_destination() {
        let provider = MemoryProvider::new();
        let source = provider.allocate(Size::new(2, 2)).unwrap();
        let mut dest = provider.allocate(Size::new(2, 2)).unwrap();
        provider.fill_solid(&mut dest, PixelRect::new(0, 0, 2, 2), Color::BLUE);
        provider.blit(&source, &mut dest, Offset::ORIGIN);
        assert!(dest.pixels().iter().all(|p| *p == Rgba::from(Color::BLUE)));
    }

    #[test]
    fn test_live_count_follows_drop() {
        let provider = MemoryProvider::new();
        let canvas = provider.allocate(Size::new(1, 1)).unwrap();
        assert_eq!(provider.live_canvases(), 1);
        provider.release(canvas);
        assert_eq!(provider.live_canvases(), 0);
    }
}
