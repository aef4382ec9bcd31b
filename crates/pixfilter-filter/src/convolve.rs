//! Convolution operations
//!
//! Implements kernel correlation with edge-replicate borders, and the two
//! fixed neighborhood filters built on it: Sobel edge magnitude and emboss.
//!
//! Sums are accumulated per channel in `f32`, truncated toward zero and
//! clamped to `[0, 255]`. The kernel is applied as written (correlation);
//! it is not flipped.

use crate::FilterResult;
use crate::driver::for_each_pixel;
use pixfilter_core::{Image, Kernel, Outcome, ProgressSink, Rgb, clamp};

/// Per-channel weighted sums over the kernel window centered on (x, y).
#[inline]
fn window_sums(img: &Image, kernel: &Kernel, x: u32, y: u32) -> [f32; 3] {
    let (x, y) = (x as i32, y as i32);
    let mut sums = [0.0f32; 3];
    for (dx, dy, weight) in kernel.taps() {
        let p = img.pixel_clamped(x + dx, y + dy);
        sums[0] += f32::from(p.r) * weight;
        sums[1] += f32::from(p.g) * weight;
        sums[2] += f32::from(p.b) * weight;
    }
    sums
}

/// Correlate a single pixel with a kernel.
pub fn correlate_pixel(img: &Image, kernel: &Kernel, x: u32, y: u32) -> Rgb {
    let [r, g, b] = window_sums(img, kernel, x, y);
    Rgb::from_clamped(r as i32, g as i32, b as i32)
}

/// Convolve an image with a kernel
///
/// Uses replicate (clamp) border handling: pixels outside the image boundary
/// are treated as having the same value as the nearest edge pixel.
pub fn convolve(img: &Image, kernel: &Kernel, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    for_each_pixel("convolve", img, progress, |src, x, y| {
        correlate_pixel(src, kernel, x, y)
    })
}

/// 3x3 uniform blur.
pub fn box_blur(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    convolve(img, &Kernel::box_blur(), progress)
}

/// Gaussian blur with a `(2 radius + 1)` square kernel.
pub fn gaussian_blur(
    img: &Image,
    radius: u32,
    sigma: f32,
    progress: &dyn ProgressSink,
) -> FilterResult<Outcome> {
    let kernel = Kernel::gaussian(radius, sigma)?;
    convolve(img, &kernel, progress)
}

/// Sharpen with the 3x3 `5`-center Laplacian kernel.
pub fn sharpen(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    convolve(img, &Kernel::sharpen(), progress)
}

/// Diagonal motion blur over `length` pixels.
pub fn motion_blur(img: &Image, length: u32, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    let kernel = Kernel::motion_blur(length)?;
    convolve(img, &kernel, progress)
}

/// Sobel gradient magnitude at (x, y).
///
/// Red and green are `trunc(sqrt(gx^2 + gy^2))` of their own channel. The
/// blue output repeats the green magnitude; the blue input is not used.
pub fn sobel_pixel(img: &Image, gx: &Kernel, gy: &Kernel, x: u32, y: u32) -> Rgb {
    let sx = window_sums(img, gx, x, y);
    let sy = window_sums(img, gy, x, y);
    let magnitude = |c: usize| (sx[c] * sx[c] + sy[c] * sy[c]).sqrt() as i32;
    let g = magnitude(1);
    Rgb::from_clamped(magnitude(0), g, g)
}

/// Sobel edge magnitude
pub fn sobel(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    let gx = Kernel::sobel_x();
    let gy = Kernel::sobel_y();
    for_each_pixel("sobel", img, progress, |src, x, y| {
        sobel_pixel(src, &gx, &gy, x, y)
    })
}

/// Emboss luma of one pixel: each weighted channel is truncated separately.
#[inline]
fn emboss_luma(p: Rgb) -> i32 {
    (0.36 * f64::from(p.r)) as i32 + (0.53 * f64::from(p.g)) as i32 + (0.11 * f64::from(p.b)) as i32
}

/// Emboss at (x, y).
///
/// Correlates the emboss kernel over the neighborhood's luma, then maps
/// the sum `s` to `(s + 255) / 2`. The result is gray.
pub fn emboss_pixel(img: &Image, kernel: &Kernel, x: u32, y: u32) -> Rgb {
    let (x, y) = (x as i32, y as i32);
    let mut sum = 0.0f32;
    for (dx, dy, weight) in kernel.taps() {
        sum += emboss_luma(img.pixel_clamped(x + dx, y + dy)) as f32 * weight;
    }
    Rgb::gray(clamp((sum as i32 + 255) / 2, 0, 255) as u8)
}

/// Emboss an image
pub fn emboss(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    let kernel = Kernel::emboss();
    for_each_pixel("emboss", img, progress, |src, x, y| {
        emboss_pixel(src, &kernel, x, y)
    })
}
