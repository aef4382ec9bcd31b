//! Rank filtering operations
//!
//! Provides the 3x3 median filter. Each channel is ranked independently,
//! so the output pixel need not appear anywhere in the source.

use crate::FilterResult;
use crate::driver::for_each_pixel;
use pixfilter_core::{Image, Outcome, ProgressSink, Rgb};

/// Side of the median window
const MEDIAN_SIZE: i32 = 3;

/// Per-channel median of the 3x3 neighborhood of (x, y), edge-replicated.
pub fn median_pixel(img: &Image, x: u32, y: u32) -> Rgb {
    let (x, y) = (x as i32, y as i32);
    let r = MEDIAN_SIZE / 2;
    let mut reds = [0u8; 9];
    let mut greens = [0u8; 9];
    let mut blues = [0u8; 9];

    let mut n = 0;
    for dy in -r..=r {
        for dx in -r..=r {
            let p = img.pixel_clamped(x + dx, y + dy);
            reds[n] = p.r;
            greens[n] = p.g;
            blues[n] = p.b;
            n += 1;
        }
    }

    reds.sort_unstable();
    greens.sort_unstable();
    blues.sort_unstable();
    Rgb::new(reds[4], greens[4], blues[4])
}

/// Apply a 3x3 median filter.
pub fn median_filter(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    for_each_pixel("median", img, progress, |src, x, y| median_pixel(src, x, y))
}
