//! Point filters
//!
//! Each output pixel depends only on the source pixel at the same position.

use crate::FilterResult;
use crate::driver::for_each_pixel;
use pixfilter_core::{Image, Outcome, ProgressSink, Rgb, clamp};

/// Default sepia tint strength
pub const DEFAULT_SEPIA_RATIO: f32 = 25.0;

/// Default brightness offset
pub const DEFAULT_BRIGHTNESS: i32 = 10;

/// Luma weighting used by grayscale and sepia.
///
/// The blue weight is 0.144, so the weights sum to 1.03 and bright pixels
/// saturate before reaching pure white.
#[inline]
fn luma(p: Rgb) -> f64 {
    0.299 * f64::from(p.r) + 0.587 * f64::from(p.g) + 0.144 * f64::from(p.b)
}

/// `255 - channel` on every channel.
#[inline]
pub fn invert_pixel(p: Rgb) -> Rgb {
    Rgb::new(255 - p.r, 255 - p.g, 255 - p.b)
}

/// Truncated luma on all three channels.
#[inline]
pub fn grayscale_pixel(p: Rgb) -> Rgb {
    Rgb::gray(clamp(luma(p) as i32, 0, 255) as u8)
}

/// Luma tinted toward brown: `+2 ratio` red, `+ratio/2` green, `-ratio` blue.
#[inline]
pub fn sepia_pixel(p: Rgb, ratio: f32) -> Rgb {
    let l = luma(p);
    let ratio = f64::from(ratio);
    Rgb::from_clamped(
        (l + 2.0 * ratio) as i32,
        (l + 0.5 * ratio) as i32,
        (l - ratio) as i32,
    )
}

/// Add `ratio` to every channel.
#[inline]
pub fn brightness_pixel(p: Rgb, ratio: i32) -> Rgb {
    Rgb::from_clamped(
        i32::from(p.r).saturating_add(ratio),
        i32::from(p.g).saturating_add(ratio),
        i32::from(p.b).saturating_add(ratio),
    )
}

/// Invert every channel of an image.
pub fn invert(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    for_each_pixel("invert", img, progress, |src, x, y| {
        invert_pixel(src.pixel(x, y))
    })
}

/// Convert an image to gray.
pub fn grayscale(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    for_each_pixel("grayscale", img, progress, |src, x, y| {
        grayscale_pixel(src.pixel(x, y))
    })
}

/// Apply a sepia tone.
pub fn sepia(img: &Image, ratio: f32, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    for_each_pixel("sepia", img, progress, |src, x, y| {
        sepia_pixel(src.pixel(x, y), ratio)
    })
}

/// Shift brightness by `ratio` (may be negative).
pub fn brightness(img: &Image, ratio: i32, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    for_each_pixel("brightness", img, progress, |src, x, y| {
        brightness_pixel(src.pixel(x, y), ratio)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfilter_core::NoProgress;

    #[test]
    fn test_invert_pixel() {
        assert_eq!(invert_pixel(Rgb::new(0, 100, 255)), Rgb::new(255, 155, 0));
    }

    #[test]
    fn test_grayscale_pixel() {
        // 0.299*100 + 0.587*150 + 0.144*200 = 146.75
        assert_eq!(grayscale_pixel(Rgb::new(100, 150, 200)), Rgb::gray(146));
        // 1.03 * 255 saturates
        assert_eq!(grayscale_pixel(Rgb::WHITE), Rgb::WHITE);
        assert_eq!(grayscale_pixel(Rgb::BLACK), Rgb::BLACK);
    }

    #[test]
    fn test_sepia_pixel() {
        // luma 146.75 -> 196.75, 159.25, 121.75
        assert_eq!(
            sepia_pixel(Rgb::new(100, 150, 200), 25.0),
            Rgb::new(196, 159, 121)
        );
        assert_eq!(sepia_pixel(Rgb::BLACK, 25.0), Rgb::new(50, 12, 0));
        assert_eq!(sepia_pixel(Rgb::WHITE, 25.0), Rgb::new(255, 255, 237));
    }

    #[test]
    fn test_brightness_pixel() {
        assert_eq!(brightness_pixel(Rgb::new(0, 250, 100), 10), Rgb::new(10, 255, 110));
        assert_eq!(brightness_pixel(Rgb::new(5, 250, 100), -10), Rgb::new(0, 240, 90));
        assert_eq!(brightness_pixel(Rgb::gray(1), i32::MAX), Rgb::WHITE);
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let img = Image::from_fn(9, 5, |x, y| Rgb::new((x * 28) as u8, (y * 50) as u8, 3)).unwrap();
        let once = invert(&img, &NoProgress).unwrap().into_image().unwrap();
        let twice = invert(&once, &NoProgress).unwrap().into_image().unwrap();
        assert_eq!(twice, img);
    }

    #[test]
    fn test_grayscale_channels_equal() {
        let img = Image::from_fn(6, 6, |x, y| Rgb::new((x * 40) as u8, (y * 40) as u8, 77)).unwrap();
        let out = grayscale(&img, &NoProgress).unwrap().into_image().unwrap();
        assert!(out.pixels().iter().all(|p| p.r == p.g && p.g == p.b));
    }
}
