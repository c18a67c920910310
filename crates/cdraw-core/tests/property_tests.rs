//! Property tests for the dimension laws of the combinators.
//!
//! Sizes are drawn from `u8` so every case allocates small canvases.

use cdraw_core::{Align, Color, Compositor, MemoryCanvas, MemoryProvider, Rgba, Surface};
use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;

fn compositor() -> Compositor<MemoryProvider> {
    Compositor::new(MemoryProvider::new())
}

fn block(c: &Compositor<MemoryProvider>, w: u8, h: u8, color: Color) -> Surface<MemoryCanvas> {
    c.rectangle(i32::from(w), i32::from(h), color).unwrap()
}

fn any_align(index: u8) -> Align {
    let all: Vec<Align> = Align::iter().collect();
    all[usize::from(index) % all.len()]
}

#[quickcheck]
fn beside_adds_widths_and_takes_max_height(lw: u8, lh: u8, rw: u8, rh: u8, align: u8) -> bool {
    let c = compositor();
    let left = block(&c, lw, lh, Color::RED);
    let right = block(&c, rw, rh, Color::BLUE);
    let out = c.beside_align(&left, &right, any_align(align)).unwrap();
    c.width(&out) == u32::from(lw) + u32::from(rw) && c.height(&out) == u32::from(lh.max(rh))
}

#[quickcheck]
fn above_adds_heights_and_takes_max_width(tw: u8, th: u8, bw: u8, bh: u8, align: u8) -> bool {
    let c = compositor();
    let top = block(&c, tw, th, Color::RED);
    let bottom = block(&c, bw, bh, Color::BLUE);
    let out = c.above_align(&top, &bottom, any_align(align)).unwrap();
    c.height(&out) == u32::from(th) + u32::from(bh) && c.width(&out) == u32::from(tw.max(bw))
}

#[quickcheck]
fn overlay_dimensions_are_order_independent(aw: u8, ah: u8, bw: u8, bh: u8) -> bool {
    let c = compositor();
    let a = block(&c, aw, ah, Color::RED);
    let b = block(&c, bw, bh, Color::BLUE);
    let ab = c.overlay(&a, &b).unwrap();
    let ba = c.overlay(&b, &a).unwrap();
    ab.size() == ba.size()
        && c.width(&ab) == u32::from(aw.max(bw))
        && c.height(&ab) == u32::from(ah.max(bh))
}

#[quickcheck]
fn square_is_rectangle(side: u8, r: u8, g: u8, b: u8) -> bool {
    let c = compositor();
    let color = Color::rgb(r, g, b);
    let square = c.square(i32::from(side), color).unwrap();
    let rect = block(&c, side, side, color);
    square.size() == rect.size() && square.canvas().pixels() == rect.canvas().pixels()
}

#[quickcheck]
fn rectangle_is_uniformly_opaque(w: u8, h: u8, r: u8, g: u8, b: u8) -> bool {
    let c = compositor();
    let rect = block(&c, w, h, Color::rgb(r, g, b));
    let expected = Rgba::new(r, g, b, 255);
    rect.canvas().pixels().iter().all(|p| *p == expected)
}

#[quickcheck]
fn beside_preserves_both_children(lw: u8, lh: u8, rw: u8, rh: u8) -> bool {
    let c = compositor();
    let left = block(&c, lw, lh, Color::RED);
    let right = block(&c, rw, rh, Color::BLUE);
    let out = c.beside(&left, &right).unwrap();

    let painted = |color: Color| {
        out.canvas()
            .pixels()
            .iter()
            .filter(|p| **p == Rgba::from(color))
            .count()
    };
    painted(Color::RED) == usize::from(lw) * usize::from(lh)
        && painted(Color::BLUE) == usize::from(rw) * usize::from(rh)
}
