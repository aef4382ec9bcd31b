//! Geometric remap filters
//!
//! Each output pixel is copied verbatim from a displaced source position.
//! Displaced coordinates are clamped into the image.

use crate::FilterResult;
use crate::driver::for_each_pixel;
use pixfilter_core::{Image, Outcome, ProgressSink};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;

/// Wave amplitude in pixels
const WAVE_AMPLITUDE: f64 = 20.0;

/// Wave period in pixels
const WAVE_PERIOD: f64 = 60.0;

/// Glass displacement step; offsets are multiples of this in `[-2, 2]` steps
const GLASS_STEP: i32 = 5;

/// Draw one glass displacement `(dx, dy)`.
///
/// Each axis is `(u - 2) * 5` with `u` uniform in `[0, 5)`, so offsets are
/// one of -10, -5, 0, 5, 10. The x draw happens before the y draw.
pub fn glass_offset<R: Rng + ?Sized>(rng: &mut R) -> (i32, i32) {
    let dx = (rng.gen_range(0..5) - 2) * GLASS_STEP;
    let dy = (rng.gen_range(0..5) - 2) * GLASS_STEP;
    (dx, dy)
}

/// Frosted-glass scatter using a caller-supplied random source.
pub fn glass_with_rng<R: Rng + ?Sized>(
    img: &Image,
    rng: &mut R,
    progress: &dyn ProgressSink,
) -> FilterResult<Outcome> {
    for_each_pixel("glass", img, progress, |src, x, y| {
        let (dx, dy) = glass_offset(&mut *rng);
        src.pixel_clamped(x as i32 + dx, y as i32 + dy)
    })
}

/// Frosted-glass scatter.
///
/// With a seed the result is reproducible; without one the generator is
/// seeded from system entropy.
pub fn glass(img: &Image, seed: Option<u64>, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    glass_with_rng(img, &mut rng, progress)
}

/// Source column for output column `x` displaced by a sine of `t`:
/// `trunc(x + 20 * sin(2 pi t / 60))`.
///
/// The sum is truncated toward zero, so a negative fractional displacement
/// lands one column further left than truncating the displacement alone.
#[inline]
pub fn wave_source(x: u32, t: u32) -> i32 {
    let shift = WAVE_AMPLITUDE * (2.0 * PI * f64::from(t) / WAVE_PERIOD).sin();
    (f64::from(x) + shift) as i32
}

/// Shift each row sideways by a sine of its `y`: vertical ripples.
pub fn vertical_waves(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    for_each_pixel("vertical-waves", img, progress, |src, x, y| {
        src.pixel_clamped(wave_source(x, y), y as i32)
    })
}

/// Shift each column sideways by a sine of its own `x`.
pub fn horizontal_waves(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    for_each_pixel("horizontal-waves", img, progress, |src, x, y| {
        src.pixel_clamped(wave_source(x, x), y as i32)
    })
}
