//! The filter sum type
//!
//! [`Filter`] names one configured filter. It is built per invocation,
//! used for one [`Filter::process_image`] call and then dropped;
//! statistics filters capture the source statistics at construction.

use crate::stats::{LinearStretch, PerfectReflector};
use crate::{FilterError, FilterResult, convolve, point, rank, warp};
use pixfilter_core::{Image, Kernel, Outcome, ProgressSink};
use pixfilter_morph::Sel;

/// Morphological operation selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorphOp {
    /// Maximum over the element
    Dilation,
    /// Minimum over the element
    Erosion,
    /// Erosion then dilation
    Opening,
    /// Dilation then erosion
    Closing,
    /// Closing run for progress, erosion returned
    TopHat,
}

impl MorphOp {
    /// Stable lowercase name
    pub fn name(self) -> &'static str {
        match self {
            MorphOp::Dilation => "dilation",
            MorphOp::Erosion => "erosion",
            MorphOp::Opening => "opening",
            MorphOp::Closing => "closing",
            MorphOp::TopHat => "top-hat",
        }
    }
}

/// A configured image filter
#[derive(Debug, Clone)]
pub enum Filter {
    /// `255 - channel`
    Invert,
    /// Luma on all channels
    Grayscale,
    /// Luma tinted brown
    Sepia { ratio: f32 },
    /// Add a constant to every channel
    Brightness { ratio: i32 },
    /// Correlation with an arbitrary kernel
    Convolution(Kernel),
    /// Sobel gradient magnitude
    Sobel,
    /// Emboss relief over luma
    Emboss,
    /// White balance from per-channel maxima
    PerfectReflector(PerfectReflector),
    /// Contrast stretch from per-channel extremes
    LinearStretch(LinearStretch),
    /// Random scatter by up to 10 pixels
    Glass { seed: Option<u64> },
    /// Rows shifted by a sine of `y`
    VerticalWaves,
    /// Columns shifted by a sine of `x`
    HorizontalWaves,
    /// Dilation, erosion and their composites
    Morphological { op: MorphOp, sel: Sel },
    /// 3x3 per-channel median
    Median,
}

impl Filter {
    /// Sepia with the given tint strength.
    pub fn sepia(ratio: f32) -> FilterResult<Self> {
        if !ratio.is_finite() {
            return Err(FilterError::InvalidParameters(format!(
                "sepia ratio must be finite, got {ratio}"
            )));
        }
        Ok(Filter::Sepia { ratio })
    }

    /// Brightness shift.
    pub fn brightness(ratio: i32) -> Self {
        Filter::Brightness { ratio }
    }

    /// 3x3 uniform blur.
    pub fn blur() -> Self {
        Filter::Convolution(Kernel::box_blur())
    }

    /// Normalized Gaussian blur.
    pub fn gauss(radius: u32, sigma: f32) -> FilterResult<Self> {
        Ok(Filter::Convolution(Kernel::gaussian(radius, sigma)?))
    }

    /// 3x3 sharpen.
    pub fn sharpen() -> Self {
        Filter::Convolution(Kernel::sharpen())
    }

    /// Diagonal motion blur.
    pub fn motion_blur(length: u32) -> FilterResult<Self> {
        Ok(Filter::Convolution(Kernel::motion_blur(length)?))
    }

    /// Perfect reflector built from the statistics of `source`.
    pub fn perfect_reflector(source: &Image) -> Self {
        Filter::PerfectReflector(PerfectReflector::from_image(source))
    }

    /// Linear stretch built from the statistics of `source`.
    pub fn linear_stretch(source: &Image) -> Self {
        Filter::LinearStretch(LinearStretch::from_image(source))
    }

    /// Morphological operation with a structuring element taken from `kernel`.
    pub fn morphological(op: MorphOp, kernel: &Kernel) -> FilterResult<Self> {
        Ok(Filter::Morphological {
            op,
            sel: Sel::from_kernel(kernel)?,
        })
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Invert => "invert",
            Filter::Grayscale => "grayscale",
            Filter::Sepia { .. } => "sepia",
            Filter::Brightness { .. } => "brightness",
            Filter::Convolution(_) => "convolution",
            Filter::Sobel => "sobel",
            Filter::Emboss => "emboss",
            Filter::PerfectReflector(_) => "perfect-reflector",
            Filter::LinearStretch(_) => "linear-stretch",
            Filter::Glass { .. } => "glass",
            Filter::VerticalWaves => "vertical-waves",
            Filter::HorizontalWaves => "horizontal-waves",
            Filter::Morphological { op, .. } => op.name(),
            Filter::Median => "median",
        }
    }

    /// Run the filter over `img`.
    ///
    /// The source is never modified. On [`Outcome::Completed`] the new image
    /// has the source's dimensions.
    pub fn process_image(&self, img: &Image, progress: &dyn ProgressSink) -> FilterResult<Outcome> {
        match self {
            Filter::Invert => point::invert(img, progress),
            Filter::Grayscale => point::grayscale(img, progress),
            Filter::Sepia { ratio } => point::sepia(img, *ratio, progress),
            Filter::Brightness { ratio } => point::brightness(img, *ratio, progress),
            Filter::Convolution(kernel) => convolve::convolve(img, kernel, progress),
            Filter::Sobel => convolve::sobel(img, progress),
            Filter::Emboss => convolve::emboss(img, progress),
            Filter::PerfectReflector(f) => f.process(img, progress),
            Filter::LinearStretch(f) => f.process(img, progress),
            Filter::Glass { seed } => warp::glass(img, *seed, progress),
            Filter::VerticalWaves => warp::vertical_waves(img, progress),
            Filter::HorizontalWaves => warp::horizontal_waves(img, progress),
            Filter::Morphological { op, sel } => {
                let outcome = match op {
                    MorphOp::Dilation => pixfilter_morph::dilate(img, sel, progress)?,
                    MorphOp::Erosion => pixfilter_morph::erode(img, sel, progress)?,
                    MorphOp::Opening => pixfilter_morph::open(img, sel, progress)?,
                    MorphOp::Closing => pixfilter_morph::close(img, sel, progress)?,
                    MorphOp::TopHat => pixfilter_morph::top_hat(img, sel, progress)?,
                };
                Ok(outcome)
            }
            Filter::Median => rank::median_filter(img, progress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixfilter_core::{NoProgress, Rgb};

    fn sample() -> Image {
        Image::from_fn(12, 9, |x, y| Rgb::new((x * 20) as u8, (y * 25) as u8, ((x * y) % 256) as u8))
            .unwrap()
    }

    #[test]
    fn test_every_variant_keeps_dimensions() {
        let img = sample();
        let cross = Kernel::parse("0 1 0\n1 1 1\n0 1 0").unwrap();
        let mut filters = vec![
            Filter::Invert,
            Filter::Grayscale,
            Filter::sepia(25.0).unwrap(),
            Filter::brightness(-30),
            Filter::blur(),
            Filter::gauss(3, 2.0).unwrap(),
            Filter::sharpen(),
            Filter::motion_blur(10).unwrap(),
            Filter::Sobel,
            Filter::Emboss,
            Filter::perfect_reflector(&img),
            Filter::linear_stretch(&img),
            Filter::Glass { seed: Some(1) },
            Filter::VerticalWaves,
            Filter::HorizontalWaves,
            Filter::Median,
        ];
        for op in [
            MorphOp::Dilation,
            MorphOp::Erosion,
            MorphOp::Opening,
            MorphOp::Closing,
            MorphOp::TopHat,
        ] {
            filters.push(Filter::morphological(op, &cross).unwrap());
        }

        for filter in &filters {
            let out = filter
                .process_image(&img, &NoProgress)
                .unwrap()
                .into_image()
                .unwrap_or_else(|| panic!("{} was cancelled", filter.name()));
            assert_eq!(out.dimensions(), img.dimensions(), "{}", filter.name());
        }
    }

    #[test]
    fn test_names() {
        assert_eq!(Filter::blur().name(), "convolution");
        assert_eq!(
            Filter::morphological(MorphOp::TopHat, &Kernel::identity())
                .unwrap()
                .name(),
            "top-hat"
        );
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(Filter::gauss(3, -2.0), Err(FilterError::Core(_))));
        assert!(matches!(Filter::motion_blur(0), Err(FilterError::Core(_))));
        assert!(matches!(
            Filter::sepia(f32::NAN),
            Err(FilterError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_source_untouched() {
        let img = sample();
        let copy = img.clone();
        Filter::Invert.process_image(&img, &NoProgress).unwrap();
        assert_eq!(img, copy);
    }
}
