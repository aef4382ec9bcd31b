//! Grayscale morphological operations
//!
//! Implements dilation, erosion, opening, closing and top-hat. Only the red
//! channel of the source is read; each result is written as gray.
//!
//! # Algorithm
//!
//! - **Dilation**: maximum red value over the windowed hits (starting at 0)
//! - **Erosion**: minimum red value over the windowed hits (starting at 255)
//! - **Opening**: erosion followed by dilation (removes small bright features)
//! - **Closing**: dilation followed by erosion (fills small dark features)
//!
//! Only hits at offsets in `[-origin, origin)` on both axes take part
//! ([`Sel::window_offsets`]); the last row and column of an odd-sized
//! element are skipped.
//!
//! # Borders
//!
//! Only interior pixels, where the whole element fits inside the image, are
//! computed: `y` in `[origin_y, height - origin_y)` and `x` in
//! `[origin_x, width - origin_x)`. Every other output pixel stays black, so
//! each pass darkens a frame as wide as the element's radius, and an image
//! smaller than the element comes back entirely black.
//!
//! # Progress
//!
//! Passes scan row by row. Before each interior row `y` they report
//! `100 * y / height` and then check for cancellation.

use crate::{MorphResult, Sel};
use log::{debug, info};
use pixfilter_core::{Image, ImageMut, Outcome, ProgressSink, Rgb};

/// Run `reduce` over every interior pixel, writing its result as gray.
fn scan_interior<F>(
    name: &str,
    img: &Image,
    sel: &Sel,
    progress: &dyn ProgressSink,
    reduce: F,
) -> MorphResult<Outcome>
where
    F: Fn(&Image, i32, i32) -> u8,
{
    let (w, h) = img.dimensions();
    let rx = sel.origin_x();
    let ry = sel.origin_y();
    debug!(
        "{name}: {w}x{h} image, {}x{} element, {} of {} hits in window",
        sel.width(),
        sel.height(),
        sel.window_offsets().count(),
        sel.hit_count()
    );

    let mut out = ImageMut::new(w, h)?;
    let y_end = h.saturating_sub(ry);
    let x_end = w.saturating_sub(rx);

    for y in ry..y_end {
        progress.report_progress((100 * u64::from(y) / u64::from(h)) as u8);
        if progress.is_cancellation_requested() {
            info!("{name}: cancelled at row {y} of {h}");
            return Ok(Outcome::Cancelled);
        }
        for x in rx..x_end {
            let v = reduce(img, x as i32, y as i32);
            out.put_pixel(x, y, Rgb::gray(v));
        }
    }

    debug!("{name}: done");
    Ok(Outcome::Completed(out.into()))
}

/// Dilate an image
///
/// Dilation computes the maximum red value in the SE neighborhood, which
/// expands bright regions and shrinks dark regions.
pub fn dilate(img: &Image, sel: &Sel, progress: &dyn ProgressSink) -> MorphResult<Outcome> {
    let offsets: Vec<(i32, i32)> = sel.window_offsets().collect();
    scan_interior("dilate", img, sel, progress, |src, x, y| {
        offsets
            .iter()
            .map(|&(dx, dy)| src.pixel_clamped(x + dx, y + dy).r)
            .fold(0, u8::max)
    })
}

/// Erode an image
///
/// Erosion computes the minimum red value in the SE neighborhood, which
/// shrinks bright regions and expands dark regions.
pub fn erode(img: &Image, sel: &Sel, progress: &dyn ProgressSink) -> MorphResult<Outcome> {
    let offsets: Vec<(i32, i32)> = sel.window_offsets().collect();
    scan_interior("erode", img, sel, progress, |src, x, y| {
        offsets
            .iter()
            .map(|&(dx, dy)| src.pixel_clamped(x + dx, y + dy).r)
            .fold(255, u8::min)
    })
}

/// Run `second` on the completed result of `first`.
fn chain(
    img: &Image,
    sel: &Sel,
    progress: &dyn ProgressSink,
    first: fn(&Image, &Sel, &dyn ProgressSink) -> MorphResult<Outcome>,
    second: fn(&Image, &Sel, &dyn ProgressSink) -> MorphResult<Outcome>,
) -> MorphResult<Outcome> {
    match first(img, sel, progress)? {
        Outcome::Completed(mid) => second(&mid, sel, progress),
        Outcome::Cancelled => Ok(Outcome::Cancelled),
    }
}

/// Open an image (erosion followed by dilation)
///
/// Opening removes small bright features while preserving the overall shape.
pub fn open(img: &Image, sel: &Sel, progress: &dyn ProgressSink) -> MorphResult<Outcome> {
    chain(img, sel, progress, erode, dilate)
}

/// Close an image (dilation followed by erosion)
///
/// Closing fills small dark features while preserving the overall shape.
pub fn close(img: &Image, sel: &Sel, progress: &dyn ProgressSink) -> MorphResult<Outcome> {
    chain(img, sel, progress, dilate, erode)
}

/// Top-hat as the filter menu defines it
///
/// Runs a closing of `img` (reporting progress and honouring cancellation),
/// discards it, and returns the erosion of `img`. This is not the textbook
/// `img - opening(img)`.
pub fn top_hat(img: &Image, sel: &Sel, progress: &dyn ProgressSink) -> MorphResult<Outcome> {
    if close(img, sel, progress)?.is_cancelled() {
        return Ok(Outcome::Cancelled);
    }
    erode(img, sel, progress)
}
