//! Pixel filter regression test
//!
//! Point, statistics, remap and median filters, plus cancellation.

use pixfilter_core::{CancelToken, Image, NoProgress, Outcome, ProgressSink, Rgb};
use pixfilter_filter::{
    Filter, FilterResult, analyze, brightness, glass, grayscale, horizontal_waves, invert,
    linear_stretch, median_filter, perfect_reflector, sepia, vertical_waves,
};
use pixfilter_test::{RegParams, fixtures};
use std::cell::Cell;

fn completed(outcome: FilterResult<Outcome>) -> Image {
    outcome
        .expect("filter error")
        .into_image()
        .expect("pass completed")
}

/// Requests cancellation once `limit` progress reports have arrived.
struct CancelAfter {
    seen: Cell<usize>,
    limit: usize,
}

impl ProgressSink for CancelAfter {
    fn report_progress(&self, _percent: u8) {
        self.seen.set(self.seen.get() + 1);
    }

    fn is_cancellation_requested(&self) -> bool {
        self.seen.get() >= self.limit
    }
}

#[test]
fn filters_reg() {
    let mut rp = RegParams::new("filters");

    let noise = fixtures::noise(31, 23, 2024).expect("noise");
    let gradient = fixtures::gradient(50, 20).expect("gradient");

    // --- Test 1: point filters ---
    let twice = completed(invert(&completed(invert(&noise, &NoProgress)), &NoProgress));
    rp.compare_image(&noise, &twice);

    let gray = completed(grayscale(&noise, &NoProgress));
    rp.check(
        gray.pixels().iter().all(|p| p.r == p.g && p.g == p.b),
        "grayscale has equal channels",
    );

    let toned = completed(sepia(&gray, 25.0, &NoProgress));
    rp.check(
        toned.pixels().iter().all(|p| p.r >= p.g && p.g >= p.b),
        "sepia orders channels r >= g >= b",
    );

    let up = completed(brightness(&noise, 10, &NoProgress));
    let down = completed(brightness(&noise, -10, &NoProgress));
    let mut shifted = true;
    for ((s, u), d) in noise.pixels().iter().zip(up.pixels()).zip(down.pixels()) {
        shifted &= u.r == s.r.saturating_add(10) && d.g == s.g.saturating_sub(10);
    }
    rp.check(shifted, "brightness shifts with saturation");

    // --- Test 2: statistics ---
    let black = fixtures::solid(4, 4, Rgb::BLACK).expect("black");
    rp.compare_image(&black, &completed(perfect_reflector(&black, &NoProgress)));
    rp.compare_image(&black, &completed(linear_stretch(&black, &NoProgress)));

    let dim = fixtures::noise_in_range(20, 20, 60, 120, 8).expect("dim noise");
    let stretched = completed(linear_stretch(&dim, &NoProgress));
    let stats = analyze(&stretched);
    rp.compare_values(0.0, f64::from(stats.min.r), 0.0);
    rp.compare_values(255.0, f64::from(stats.max.r), 0.0);
    let reflected = completed(perfect_reflector(&dim, &NoProgress));
    rp.compare_values(255.0, f64::from(analyze(&reflected).max.g), 0.0);

    // --- Test 3: remaps ---
    let a = completed(glass(&gradient, Some(3), &NoProgress));
    let b = completed(glass(&gradient, Some(3), &NoProgress));
    rp.compare_image(&a, &b);
    let c = completed(glass(&gradient, Some(4), &NoProgress));
    rp.check(a != c, "different seeds scatter differently");

    let v = completed(vertical_waves(&gradient, &NoProgress));
    // Row 0 has zero displacement
    let row = |img: &Image| Image::from_fn(50, 1, |x, _| img.pixel(x, 0)).expect("row");
    rp.compare_image(&row(&gradient), &row(&v));
    let hw = completed(horizontal_waves(&gradient, &NoProgress));
    rp.compare_values(
        f64::from(gradient.pixel(35, 5).r),
        f64::from(hw.pixel(15, 5).r),
        0.0,
    );

    // --- Test 4: median ---
    let flat = fixtures::solid(7, 7, Rgb::new(1, 2, 3)).expect("flat");
    rp.compare_image(&flat, &completed(median_filter(&flat, &NoProgress)));

    // --- Test 5: cancellation leaves the source untouched ---
    let source = noise.clone();
    let token = CancelToken::new();
    token.cancel();
    for filter in [Filter::Invert, Filter::Median, Filter::Sobel, Filter::blur()] {
        let outcome = filter.process_image(&source, &token).expect("no error");
        rp.check(outcome.is_cancelled(), filter.name());
    }
    let late = CancelAfter {
        seen: Cell::new(0),
        limit: 20,
    };
    let outcome = Filter::Emboss
        .process_image(&source, &late)
        .expect("no error");
    rp.check(outcome.is_cancelled(), "cancelled mid-pass");
    rp.compare_values(20.0, late.seen.get() as f64, 0.0);
    rp.compare_image(&noise, &source);

    assert!(rp.cleanup());
}
