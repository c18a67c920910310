//! Integration tests for the tiny-skia provider and PNG export.
//!
//! Tests that render text use the machine's system fonts and return early
//! when none are installed.

use cdraw_core::{
    Color, CompositeError, Compositor, FontDescriptor, ProviderError, Rgba, Surface,
    SurfaceProvider,
};
use cdraw_raster::{FontBook, RasterCanvas, RasterProvider, save_png, to_rgba_image};

fn compositor() -> Compositor<RasterProvider> {
    Compositor::new(RasterProvider::new(FontBook::new()))
}

fn system_compositor() -> Option<Compositor<RasterProvider>> {
    let fonts = FontBook::system();
    if fonts.is_empty() {
        eprintln!("no system font installed; skipping");
        return None;
    }
    Some(Compositor::new(RasterProvider::new(fonts)))
}

fn painted(c: &Compositor<RasterProvider>, surface: &Surface<RasterCanvas>) -> usize {
    (0..surface.height())
        .flat_map(|y| (0..surface.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| c.pixel(surface, x, y).is_some_and(|p| !p.is_transparent()))
        .count()
}

#[test]
fn test_rectangle_is_solid() {
    let c = compositor();
    let rect = c.rectangle(7, 3, Color::rgb(10, 200, 30)).unwrap();
    assert_eq!((c.width(&rect), c.height(&rect)), (7, 3));
    for (x, y) in [(0, 0), (6, 0), (0, 2), (6, 2), (3, 1)] {
        assert_eq!(c.pixel(&rect, x, y), Some(Rgba::new(10, 200, 30, 255)));
    }
    assert_eq!(c.pixel(&rect, 7, 0), None);
}

#[test]
fn test_empty_is_transparent() {
    let c = compositor();
    let spacer = c.empty(4, 4).unwrap();
    assert_eq!(painted(&c, &spacer), 0);
}

#[test]
fn test_zero_area_surfaces_compose() {
    let c = compositor();
    let nothing = c.rectangle(0, 0, Color::RED).unwrap();
    let line = c.rectangle(0, 9, Color::RED).unwrap();
    let row = c.beside(&nothing, &line).unwrap();
    assert_eq!((c.width(&row), c.height(&row)), (0, 9));
    let block = c.square(3, Color::BLUE).unwrap();
    let stacked = c.above(&row, &block).unwrap();
    assert_eq!((c.width(&stacked), c.height(&stacked)), (3, 12));
    assert_eq!(c.pixel(&stacked, 1, 10), Some(Rgba::from(Color::BLUE)));
}

#[test]
fn test_beside_centers_the_shorter_child() {
    let c = compositor();
    let red = c.rectangle(10, 20, Color::RED).unwrap();
    let green = c.rectangle(5, 30, Color::GREEN).unwrap();
    let row = c.beside(&red, &green).unwrap();

    assert_eq!((c.width(&row), c.height(&row)), (15, 30));
    assert_eq!(c.pixel(&row, 0, 4), Some(Rgba::TRANSPARENT));
    assert_eq!(c.pixel(&row, 0, 5), Some(Rgba::from(Color::RED)));
    assert_eq!(c.pixel(&row, 9, 24), Some(Rgba::from(Color::RED)));
    assert_eq!(c.pixel(&row, 9, 25), Some(Rgba::TRANSPARENT));
    assert_eq!(c.pixel(&row, 10, 0), Some(Rgba::from(Color::GREEN)));
    assert_eq!(c.pixel(&row, 14, 29), Some(Rgba::from(Color::GREEN)));
}

#[test]
fn test_overlay_paints_front_last() {
    let c = compositor();
    let back = c.rectangle(100, 50, Color::RED).unwrap();
    let front = c.rectangle(50, 100, Color::BLUE).unwrap();
    let out = c.overlay(&back, &front).unwrap();

    assert_eq!((c.width(&out), c.height(&out)), (100, 100));
    assert_eq!(c.pixel(&out, 10, 10), Some(Rgba::TRANSPARENT));
    assert_eq!(c.pixel(&out, 10, 30), Some(Rgba::from(Color::RED)));
    assert_eq!(c.pixel(&out, 50, 50), Some(Rgba::from(Color::BLUE)));
    assert_eq!(c.pixel(&out, 30, 10), Some(Rgba::from(Color::BLUE)));
}

#[test]
fn test_text_without_fonts_fails_to_resolve() {
    let c = compositor();
    let err = c.text("hi", 12, Color::BLACK, "", true, false).unwrap_err();
    assert!(matches!(
        err,
        CompositeError::Provider(ProviderError::FontResolution { .. })
    ));
}

#[test]
fn test_text_is_sized_from_font_metrics() {
    let Some(c) = system_compositor() else {
        return;
    };
    let hello = c.text("Hello", 24, Color::BLACK, "", false, false).unwrap();
    assert!(c.width(&hello) > 0);
    assert!(c.height(&hello) >= 20, "height {}", c.height(&hello));
    assert!(painted(&c, &hello) > 0);

    let empty = c.text("", 24, Color::BLACK, "", false, false).unwrap();
    assert_eq!(c.width(&empty), 0);
    assert_eq!(c.height(&empty), c.height(&hello));

    let longer = c.text("Hello, world", 24, Color::BLACK, "", false, false).unwrap();
    assert!(c.width(&longer) > c.width(&hello));
}

#[test]
fn test_glyphs_without_descenders_sit_on_the_baseline() {
    let Some(c) = system_compositor() else {
        return;
    };
    // Flat-bottomed glyphs end exactly on the baseline.
    let content = "HIx";
    let font = FontDescriptor::new("", 32, false, false).unwrap();
    let metrics = c.provider().measure_text(&font, content).unwrap();
    let label = c.text_with(content, &font, Color::BLACK).unwrap();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let baseline = metrics.ascent.trunc() as u32;
    let lowest = (0..label.height())
        .rev()
        .find(|&y| (0..label.width()).any(|x| c.pixel(&label, x, y).is_some_and(|p| !p.is_transparent())))
        .unwrap();
    assert!(lowest <= baseline, "ink at row {lowest}, baseline {baseline}");
    assert!(lowest + 2 >= baseline, "ink ends at row {lowest}, baseline {baseline}");
    assert!(label.height() > baseline + 1, "descent area missing");
}

#[test]
fn test_every_style_renders_through_fallback() {
    let Some(c) = system_compositor() else {
        return;
    };
    for (bold, italic) in [(false, false), (true, false), (false, true), (true, true)] {
        let label = c.text("Ag", 16, Color::BLUE, "sans-serif", bold, italic).unwrap();
        assert!(painted(&c, &label) > 0, "bold={bold} italic={italic}");
    }
}

#[test]
fn test_to_rgba_image_copies_pixels() {
    let c = compositor();
    let red = c.rectangle(2, 1, Color::RED).unwrap();
    let spacer = c.empty(1, 1).unwrap();
    let row = c.beside(&red, &spacer).unwrap();

    let image = to_rgba_image(&row).unwrap();
    assert_eq!(image.dimensions(), (3, 1));
    assert_eq!(image.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(image.get_pixel(2, 0).0[3], 0);
}

#[test]
fn test_empty_surface_cannot_be_exported() {
    let c = compositor();
    let nothing = c.empty(0, 5).unwrap();
    assert!(to_rgba_image(&nothing).is_err());
}

#[test]
fn test_save_png_round_trips_through_disk() {
    let c = compositor();
    let square = c.square(4, Color::GREEN).unwrap();
    let path = std::env::temp_dir().join(format!("cdraw-raster-{}.png", std::process::id()));

    save_png(&square, &path).unwrap();
    let decoded = image::open(&path).unwrap().to_rgba8();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(decoded.dimensions(), (4, 4));
    assert_eq!(decoded.get_pixel(3, 3).0, [0, 255, 0, 255]);
}
