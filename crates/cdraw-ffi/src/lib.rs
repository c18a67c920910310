//! C API for cdraw.
//!
//! Exposes the compositor as `cdraw_*` functions over opaque surface
//! pointers, rendered by the raster backend. Declarations live in
//! `include/cdraw.h`.
//!
//! Every call goes through one process-wide compositor whose fonts come from
//! `FontBook::from_env()`. Failures never unwind across the boundary: they
//! return null (or `-1`) and print a warning.

use std::ffi::{CStr, c_char, c_int, c_uchar};
use std::path::Path;
use std::ptr;
use std::sync::OnceLock;

use cdraw_common::{Align, Color, warn_once};
use cdraw_core::{CompositeError, Compositor, Surface};
use cdraw_raster::{FontBook, RasterCanvas, RasterProvider, save_png};

/// Opaque handle to a composed image.
pub struct CdrawSurface(Surface<RasterCanvas>);

fn compositor() -> &'static Compositor<RasterProvider> {
    static COMPOSITOR: OnceLock<Compositor<RasterProvider>> = OnceLock::new();
    COMPOSITOR.get_or_init(|| Compositor::new(RasterProvider::new(FontBook::from_env())))
}

fn into_handle(
    operation: &str,
    result: Result<Surface<RasterCanvas>, CompositeError>,
) -> *mut CdrawSurface {
    match result {
        Ok(surface) => Box::into_raw(Box::new(CdrawSurface(surface))),
        Err(e) => {
            warn_once("ffi", &format!("{operation}: {e}"));
            ptr::null_mut()
        }
    }
}

/// # Safety
/// `surface` must be null or a live pointer returned by a `cdraw_*` function.
unsafe fn borrow<'a>(
    operation: &str,
    surface: *const CdrawSurface,
) -> Option<&'a Surface<RasterCanvas>> {
    // SAFETY: the caller guarantees the pointer is null or live.
    let handle = unsafe { surface.as_ref() };
    if handle.is_none() {
        warn_once("ffi", &format!("{operation}: null surface"));
    }
    handle.map(|h| &h.0)
}

/// # Safety
/// `s` must be null or a valid null-terminated C string.
unsafe fn borrow_str<'a>(operation: &str, s: *const c_char) -> Option<&'a str> {
    if s.is_null() {
        warn_once("ffi", &format!("{operation}: null string"));
        return None;
    }
    // SAFETY: non-null and null-terminated per the caller's contract.
    let s = unsafe { CStr::from_ptr(s) };
    match s.to_str() {
        Ok(s) => Some(s),
        Err(_) => {
            warn_once("ffi", &format!("{operation}: string is not valid UTF-8"));
            None
        }
    }
}

fn align_from_c(operation: &str, align: c_int) -> Align {
    u32::try_from(align)
        .ok()
        .and_then(Align::from_repr)
        .unwrap_or_else(|| {
            warn_once("ffi", &format!("{operation}: unknown alignment {align}; using CENTER"));
            Align::Center
        })
}

/// A `width` × `height` surface filled with `color`. Returns null for
/// negative sizes.
#[unsafe(no_mangle)]
pub extern "C" fn cdraw_rectangle(width: c_int, height: c_int, color: Color) -> *mut CdrawSurface {
    into_handle("cdraw_rectangle", compositor().rectangle(width, height, color))
}

/// A `side` × `side` surface filled with `color`. Returns null for a
/// negative side.
#[unsafe(no_mangle)]
pub extern "C" fn cdraw_square(side: c_int, color: Color) -> *mut CdrawSurface {
    into_handle("cdraw_square", compositor().square(side, color))
}

/// A transparent `width` × `height` surface. Returns null for negative sizes.
#[unsafe(no_mangle)]
pub extern "C" fn cdraw_empty(width: c_int, height: c_int) -> *mut CdrawSurface {
    into_handle("cdraw_empty", compositor().empty(width, height))
}

/// Render `text` in `font` at `size` points. A null `font` selects the
/// default family. Returns null if the text is null, the size is not
/// positive, or the font cannot be resolved.
///
/// # Safety
/// `text` and `font` must each be null or a valid null-terminated C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cdraw_text(
    text: *const c_char,
    size: c_int,
    color: Color,
    font: *const c_char,
    bold: c_uchar,
    italic: c_uchar,
) -> *mut CdrawSurface {
    const OP: &str = "cdraw_text";
    // SAFETY: forwarded from this function's contract.
    let Some(text) = (unsafe { borrow_str(OP, text) }) else {
        return ptr::null_mut();
    };
    let family = if font.is_null() {
        ""
    } else {
        // SAFETY: forwarded from this function's contract.
        match unsafe { borrow_str(OP, font) } {
            Some(family) => family,
            None => return ptr::null_mut(),
        }
    };
    into_handle(
        OP,
        compositor().text(text, size, color, family, bold != 0, italic != 0),
    )
}

/// Place `left` and `right` side by side, aligned by `align`.
///
/// # Safety
/// Both surfaces must be null or live pointers returned by `cdraw_*`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cdraw_beside_align(
    left: *const CdrawSurface,
    right: *const CdrawSurface,
    align: c_int,
) -> *mut CdrawSurface {
    const OP: &str = "cdraw_beside_align";
    // SAFETY: forwarded from this function's contract.
    let (Some(left), Some(right)) = (unsafe { borrow(OP, left) }, unsafe { borrow(OP, right) })
    else {
        return ptr::null_mut();
    };
    into_handle(
        OP,
        compositor().beside_align(left, right, align_from_c(OP, align)),
    )
}

/// [`cdraw_beside_align`] with `CENTER`.
///
/// # Safety
/// Both surfaces must be null or live pointers returned by `cdraw_*`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cdraw_beside(
    left: *const CdrawSurface,
    right: *const CdrawSurface,
) -> *mut CdrawSurface {
    // SAFETY: forwarded from this function's contract.
    unsafe { cdraw_beside_align(left, right, Align::Center as c_int) }
}

/// Stack `top` above `bottom`, aligned by `align`.
///
/// # Safety
/// Both surfaces must be null or live pointers returned by `cdraw_*`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cdraw_above_align(
    top: *const CdrawSurface,
    bottom: *const CdrawSurface,
    align: c_int,
) -> *mut CdrawSurface {
    const OP: &str = "cdraw_above_align";
    // SAFETY: forwarded from this function's contract.
    let (Some(top), Some(bottom)) = (unsafe { borrow(OP, top) }, unsafe { borrow(OP, bottom) })
    else {
        return ptr::null_mut();
    };
    into_handle(
        OP,
        compositor().above_align(top, bottom, align_from_c(OP, align)),
    )
}

/// [`cdraw_above_align`] with `CENTER`.
///
/// # Safety
/// Both surfaces must be null or live pointers returned by `cdraw_*`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cdraw_above(
    top: *const CdrawSurface,
    bottom: *const CdrawSurface,
) -> *mut CdrawSurface {
    // SAFETY: forwarded from this function's contract.
    unsafe { cdraw_above_align(top, bottom, Align::Center as c_int) }
}

/// Center `front` over `back`.
///
/// # Safety
/// Both surfaces must be null or live pointers returned by `cdraw_*`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cdraw_overlay(
    back: *const CdrawSurface,
    front: *const CdrawSurface,
) -> *mut CdrawSurface {
    const OP: &str = "cdraw_overlay";
    // SAFETY: forwarded from this function's contract.
    let (Some(back), Some(front)) = (unsafe { borrow(OP, back) }, unsafe { borrow(OP, front) })
    else {
        return ptr::null_mut();
    };
    into_handle(OP, compositor().overlay(back, front))
}

/// Width in pixels, or -1 for a null surface.
///
/// # Safety
/// `surface` must be null or a live pointer returned by `cdraw_*`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cdraw_get_width(surface: *const CdrawSurface) -> c_int {
    // SAFETY: forwarded from this function's contract.
    unsafe { borrow("cdraw_get_width", surface) }
        .and_then(|s| c_int::try_from(compositor().width(s)).ok())
        .unwrap_or(-1)
}

/// Height in pixels, or -1 for a null surface.
///
/// # Safety
/// `surface` must be null or a live pointer returned by `cdraw_*`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cdraw_get_height(surface: *const CdrawSurface) -> c_int {
    // SAFETY: forwarded from this function's contract.
    unsafe { borrow("cdraw_get_height", surface) }
        .and_then(|s| c_int::try_from(compositor().height(s)).ok())
        .unwrap_or(-1)
}

/// Release a surface. Null is a no-op.
///
/// # Safety
/// `surface` must be null or a pointer returned by `cdraw_*` that has not
/// been freed yet.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cdraw_free_surface(surface: *mut CdrawSurface) {
    if !surface.is_null() {
        // SAFETY: the pointer came from Box::into_raw and is freed once.
        let handle = unsafe { Box::from_raw(surface) };
        compositor().dispose(handle.0);
    }
}

/// Write `surface` to `path` as PNG. Returns 0 on success, -1 on failure.
///
/// # Safety
/// `surface` must be null or a live pointer returned by `cdraw_*`; `path`
/// must be null or a valid null-terminated C string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn cdraw_save_png(
    surface: *const CdrawSurface,
    path: *const c_char,
) -> c_int {
    const OP: &str = "cdraw_save_png";
    // SAFETY: forwarded from this function's contract.
    let (Some(surface), Some(path)) = (unsafe { borrow(OP, surface) }, unsafe {
        borrow_str(OP, path)
    }) else {
        return -1;
    };
    match save_png(surface, Path::new(path)) {
        Ok(()) => 0,
        Err(e) => {
            warn_once("ffi", &format!("{OP}: {e:#}"));
            -1
        }
    }
}
