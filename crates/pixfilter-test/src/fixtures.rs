//! Synthetic test images
//!
//! Regression tests build their inputs here instead of loading files, so
//! every expected value can be derived by hand from the generator.

use crate::error::{TestError, TestResult};
use pixfilter_core::{Image, Rgb};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

fn build<F>(name: &str, width: u32, height: u32, f: F) -> TestResult<Image>
where
    F: FnMut(u32, u32) -> Rgb,
{
    Image::from_fn(width, height, f).map_err(|e| TestError::Fixture {
        name: name.to_string(),
        message: e.to_string(),
    })
}

/// A single-color image.
pub fn solid(width: u32, height: u32, color: Rgb) -> TestResult<Image> {
    build("solid", width, height, |_, _| color)
}

/// Red ramps left to right, green ramps top to bottom, blue is their mix.
pub fn gradient(width: u32, height: u32) -> TestResult<Image> {
    let wd = width.saturating_sub(1).max(1);
    let hd = height.saturating_sub(1).max(1);
    build("gradient", width, height, |x, y| {
        let r = (x * 255 / wd) as u8;
        let g = (y * 255 / hd) as u8;
        let b = ((x + y) * 255 / (wd + hd)) as u8;
        Rgb::new(r, g, b)
    })
}

/// Black and white squares of side `cell`, white at the origin.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> TestResult<Image> {
    let cell = cell.max(1);
    build("checkerboard", width, height, |x, y| {
        if (x / cell + y / cell) % 2 == 0 {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    })
}

/// A white axis-aligned rectangle on black.
pub fn rectangle(
    width: u32,
    height: u32,
    x0: u32,
    y0: u32,
    rect_w: u32,
    rect_h: u32,
) -> TestResult<Image> {
    build("rectangle", width, height, |x, y| {
        if x >= x0 && x < x0 + rect_w && y >= y0 && y < y0 + rect_h {
            Rgb::WHITE
        } else {
            Rgb::BLACK
        }
    })
}

/// Reproducible RGB noise.
pub fn noise(width: u32, height: u32, seed: u64) -> TestResult<Image> {
    let mut rng = SmallRng::seed_from_u64(seed);
    build("noise", width, height, |_, _| {
        Rgb::new(
            rng.gen_range(0..=255),
            rng.gen_range(0..=255),
            rng.gen_range(0..=255),
        )
    })
}

/// Reproducible noise restricted to `[low, high]` on every channel.
pub fn noise_in_range(width: u32, height: u32, low: u8, high: u8, seed: u64) -> TestResult<Image> {
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let mut rng = SmallRng::seed_from_u64(seed);
    build("noise_in_range", width, height, |_, _| {
        Rgb::new(
            rng.gen_range(low..=high),
            rng.gen_range(low..=high),
            rng.gen_range(low..=high),
        )
    })
}
