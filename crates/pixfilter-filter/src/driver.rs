//! Per-pixel filter driver
//!
//! Most filters compute each output pixel from the source independently.
//! [`for_each_pixel`] runs such a per-pixel function over the whole image,
//! column by column.
//!
//! # Progress
//!
//! Before each column `x` the driver reports `100 * x / width` and then
//! checks for cancellation. The last report is therefore below 100; the
//! caller announces completion.

use crate::FilterResult;
use log::{debug, info};
use pixfilter_core::{Image, ImageMut, Outcome, ProgressSink, Rgb};

/// Build a new image by calling `f(src, x, y)` for every pixel.
///
/// Columns are visited left to right, and each column top to bottom. A
/// cancelled pass returns [`Outcome::Cancelled`] and drops its partial
/// output.
pub fn for_each_pixel<F>(
    name: &str,
    img: &Image,
    progress: &dyn ProgressSink,
    mut f: F,
) -> FilterResult<Outcome>
where
    F: FnMut(&Image, u32, u32) -> Rgb,
{
    let (w, h) = img.dimensions();
    debug!("{name}: {w}x{h} image");

    let mut out = ImageMut::new(w, h)?;
    for x in 0..w {
        progress.report_progress((100 * u64::from(x) / u64::from(w)) as u8);
        if progress.is_cancellation_requested() {
            info!("{name}: cancelled at column {x} of {w}");
            return Ok(Outcome::Cancelled);
        }
        for y in 0..h {
            out.put_pixel(x, y, f(img, x, y));
        }
    }

    debug!("{name}: done");
    Ok(Outcome::Completed(out.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfilter_core::NoProgress;
    use std::cell::RefCell;

    struct Recorder {
        reports: RefCell<Vec<u8>>,
        cancel_at: Option<usize>,
    }

    impl Recorder {
        fn new(cancel_at: Option<usize>) -> Self {
            Recorder {
                reports: RefCell::new(Vec::new()),
                cancel_at,
            }
        }
    }

    impl ProgressSink for Recorder {
        fn report_progress(&self, percent: u8) {
            self.reports.borrow_mut().push(percent);
        }

        fn is_cancellation_requested(&self) -> bool {
            self.cancel_at
                .is_some_and(|n| self.reports.borrow().len() > n)
        }
    }

    #[test]
    fn test_visits_column_major() {
        let img = Image::new(3, 2).unwrap();
        let mut order = Vec::new();
        for_each_pixel("order", &img, &NoProgress, |_, x, y| {
            order.push((x, y));
            Rgb::BLACK
        })
        .unwrap();
        assert_eq!(order, vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_progress_per_column() {
        let img = Image::new(4, 1).unwrap();
        let sink = Recorder::new(None);
        let outcome = for_each_pixel("p", &img, &sink, |src, x, y| src.pixel(x, y)).unwrap();
        assert!(!outcome.is_cancelled());
        assert_eq!(*sink.reports.borrow(), vec![0, 25, 50, 75]);
    }

    #[test]
    fn test_progress_monotonic_below_100() {
        let img = Image::new(7, 3).unwrap();
        let sink = Recorder::new(None);
        for_each_pixel("p", &img, &sink, |src, x, y| src.pixel(x, y)).unwrap();
        let reports = sink.reports.borrow();
        assert_eq!(reports.len(), 7);
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        assert!(reports.iter().all(|&p| p < 100));
    }

    #[test]
    fn test_cancel_stops_before_column() {
        let img = Image::new(10, 10).unwrap();
        let sink = Recorder::new(Some(3));
        let mut calls = 0;
        let outcome = for_each_pixel("c", &img, &sink, |_, _, _| {
            calls += 1;
            Rgb::WHITE
        })
        .unwrap();
        assert_eq!(outcome, Outcome::Cancelled);
        // Three full columns were computed before the fourth check fired
        assert_eq!(calls, 30);
    }
}
