//! Statistics filters
//!
//! Two-pass filters: [`analyze`] scans the source once for per-channel
//! extremes, then the filter built from those [`ChannelStats`] rescales
//! every pixel.
//!
//! ```
//! use pixfilter_core::{Image, NoProgress, Rgb};
//! use pixfilter_filter::stats::{LinearStretch, analyze};
//!
//! let img = Image::from_fn(2, 1, |x, _| Rgb::gray(100 + x as u8 * 50)).unwrap();
//! let stretch = LinearStretch::from_stats(&analyze(&img));
//! assert_eq!(stretch.apply(Rgb::gray(150)), Rgb::WHITE);
//! ```

use crate::FilterResult;
use crate::driver::for_each_pixel;
use log::warn;
use pixfilter_core::{Image, Outcome, ProgressSink, Rgb};

/// Per-channel minimum and maximum of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelStats {
    /// Smallest value seen on each channel
    pub min: Rgb,
    /// Largest value seen on each channel
    pub max: Rgb,
}

/// Scan an image for per-channel extremes.
pub fn analyze(img: &Image) -> ChannelStats {
    let mut min = [255u8; 3];
    let mut max = [0u8; 3];
    for p in img.pixels() {
        for (c, v) in p.channels().into_iter().enumerate() {
            min[c] = min[c].min(v);
            max[c] = max[c].max(v);
        }
    }
    ChannelStats {
        min: Rgb::new(min[0], min[1], min[2]),
        max: Rgb::new(max[0], max[1], max[2]),
    }
}

const CHANNEL_NAMES: [&str; 3] = ["red", "green", "blue"];

/// Perfect reflector white balance: `channel * 255 / max`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerfectReflector {
    max: [i32; 3],
}

impl PerfectReflector {
    /// Build from precomputed statistics.
    ///
    /// A channel whose maximum is 0 passes through unchanged.
    pub fn from_stats(stats: &ChannelStats) -> Self {
        let max = stats.max.channels().map(i32::from);
        let zero: Vec<&str> = (0..3)
            .filter(|&c| max[c] == 0)
            .map(|c| CHANNEL_NAMES[c])
            .collect();
        if !zero.is_empty() {
            warn!(
                "perfect reflector: {} channel maximum is 0, passing through",
                zero.join("/")
            );
        }
        PerfectReflector { max }
    }

    /// Scan `img` and build from its statistics.
    pub fn from_image(img: &Image) -> Self {
        Self::from_stats(&analyze(img))
    }

    /// Rescale one pixel.
    pub fn apply(&self, p: Rgb) -> Rgb {
        let [r, g, b] = p.channels().map(i32::from);
        let scale = |v: i32, max: i32| if max == 0 { v } else { v * 255 / max };
        Rgb::from_clamped(
            scale(r, self.max[0]),
            scale(g, self.max[1]),
            scale(b, self.max[2]),
        )
    }

    /// Apply to every pixel of `img`.
    pub fn process(&self, img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
        for_each_pixel("perfect-reflector", img, progress, |src, x, y| {
            self.apply(src.pixel(x, y))
        })
    }
}

/// Linear contrast stretch: `(channel - min) * 255 / (max - min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearStretch {
    min: [i32; 3],
    max: [i32; 3],
}

impl LinearStretch {
    /// Build from precomputed statistics.
    ///
    /// A constant channel (`max == min`) passes through unchanged.
    pub fn from_stats(stats: &ChannelStats) -> Self {
        let min = stats.min.channels().map(i32::from);
        let max = stats.max.channels().map(i32::from);
        let flat: Vec<&str> = (0..3)
            .filter(|&c| max[c] <= min[c])
            .map(|c| CHANNEL_NAMES[c])
            .collect();
        if !flat.is_empty() {
            warn!(
                "linear stretch: {} channel is constant, passing through",
                flat.join("/")
            );
        }
        LinearStretch { min, max }
    }

    /// Scan `img` and build from its statistics.
    pub fn from_image(img: &Image) -> Self {
        Self::from_stats(&analyze(img))
    }

    /// Rescale one pixel.
    pub fn apply(&self, p: Rgb) -> Rgb {
        let v = p.channels().map(i32::from);
        let stretch = |c: usize| {
            let range = self.max[c] - self.min[c];
            if range <= 0 {
                v[c]
            } else {
                (v[c] - self.min[c]) * 255 / range
            }
        };
        Rgb::from_clamped(stretch(0), stretch(1), stretch(2))
    }

    /// Apply to every pixel of `img`.
    pub fn process(&self, img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
        for_each_pixel("linear-stretch", img, progress, |src, x, y| {
            self.apply(src.pixel(x, y))
        })
    }
}

/// Analyze `img` and apply the perfect reflector built from it.
pub fn perfect_reflector(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    PerfectReflector::from_image(img).process(img, progress)
}

/// Analyze `img` and apply the linear stretch built from it.
pub fn linear_stretch(img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
    LinearStretch::from_image(img).process(img, progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfilter_core::NoProgress;

    fn two_tone() -> Image {
        Image::from_fn(2, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb::new(10, 20, 30)
            } else {
                Rgb::new(110, 70, 60)
            }
        })
        .unwrap()
    }

    #[test]
    fn test_analyze() {
        let stats = analyze(&two_tone());
        assert_eq!(stats.min, Rgb::new(10, 20, 30));
        assert_eq!(stats.max, Rgb::new(110, 70, 60));
    }

    #[test]
    fn test_perfect_reflector_scales_to_255() {
        let f = PerfectReflector::from_image(&two_tone());
        assert_eq!(f.apply(Rgb::new(110, 70, 60)), Rgb::WHITE);
        // 10*255/110 = 23, 20*255/70 = 72, 30*255/60 = 127
        assert_eq!(f.apply(Rgb::new(10, 20, 30)), Rgb::new(23, 72, 127));
    }

    #[test]
    fn test_perfect_reflector_black_image() {
        let img = Image::new(4, 4).unwrap();
        let out = perfect_reflector(&img, &NoProgress).unwrap().into_image().unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_perfect_reflector_clamps_foreign_image() {
        let f = PerfectReflector::from_stats(&ChannelStats {
            min: Rgb::BLACK,
            max: Rgb::gray(100),
        });
        assert_eq!(f.apply(Rgb::gray(200)), Rgb::WHITE);
    }

    #[test]
    fn test_linear_stretch_full_range() {
        let f = LinearStretch::from_image(&two_tone());
        assert_eq!(f.apply(Rgb::new(10, 20, 30)), Rgb::BLACK);
        assert_eq!(f.apply(Rgb::new(110, 70, 60)), Rgb::WHITE);
        // (60-10)*255/100 = 127
        assert_eq!(f.apply(Rgb::new(60, 20, 30)).r, 127);
    }

    #[test]
    fn test_linear_stretch_constant_channel_passes_through() {
        let img = Image::from_fn(3, 1, |x, _| Rgb::new(x as u8 * 10, 42, 42)).unwrap();
        let f = LinearStretch::from_image(&img);
        assert_eq!(f.apply(Rgb::new(10, 42, 42)), Rgb::new(127, 42, 42));
    }

    #[test]
    fn test_linear_stretch_below_min_clamps() {
        let f = LinearStretch::from_stats(&ChannelStats {
            min: Rgb::gray(50),
            max: Rgb::gray(150),
        });
        assert_eq!(f.apply(Rgb::gray(10)), Rgb::BLACK);
    }
}
