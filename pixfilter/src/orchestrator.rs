//! Filter selection and invocation
//!
//! [`FilterKind`] names every filter the engine offers. [`build_filter`]
//! turns a kind plus [`FilterParams`] into a configured
//! [`Filter`](pixfilter_filter::Filter) for one source image, and
//! [`run_filter`] builds and runs it in one step.
//!
//! Statistics filters take their per-channel extremes from the source
//! passed to `build_filter`, so a filter is always rebuilt from the image it
//! is about to process.

use crate::error::{ParseFilterKindError, WorkerError, WorkerResult};
use log::debug;
use pixfilter_core::{Image, Kernel, Outcome, ProgressSink};
use pixfilter_filter::point::{DEFAULT_BRIGHTNESS, DEFAULT_SEPIA_RATIO};
use pixfilter_filter::{Filter, MorphOp};
use std::fmt;
use std::str::FromStr;

/// Default Gaussian radius
pub const DEFAULT_GAUSS_RADIUS: u32 = 3;

/// Default Gaussian sigma
pub const DEFAULT_GAUSS_SIGMA: f32 = 2.0;

/// Default motion blur length
pub const DEFAULT_MOTION_LENGTH: u32 = 10;

/// Every filter the engine can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Invert,
    Grayscale,
    Sepia,
    Brightness,
    PerfectReflector,
    LinearStretch,
    Glass,
    VerticalWaves,
    HorizontalWaves,
    Blur,
    Gauss,
    Sharpen,
    MotionBlur,
    Sobel,
    Emboss,
    Median,
    /// Correlation with the kernel from [`FilterParams::kernel`]
    Convolve,
    Dilation,
    Erosion,
    Opening,
    Closing,
    TopHat,
}

impl FilterKind {
    /// All kinds, in menu order.
    pub const ALL: [FilterKind; 22] = [
        FilterKind::Invert,
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Brightness,
        FilterKind::PerfectReflector,
        FilterKind::LinearStretch,
        FilterKind::Glass,
        FilterKind::VerticalWaves,
        FilterKind::HorizontalWaves,
        FilterKind::Blur,
        FilterKind::Gauss,
        FilterKind::Sharpen,
        FilterKind::MotionBlur,
        FilterKind::Sobel,
        FilterKind::Emboss,
        FilterKind::Median,
        FilterKind::Convolve,
        FilterKind::Dilation,
        FilterKind::Erosion,
        FilterKind::Opening,
        FilterKind::Closing,
        FilterKind::TopHat,
    ];

    /// Command-line name of the filter.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Invert => "invert",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Brightness => "brightness",
            FilterKind::PerfectReflector => "perfect-reflector",
            FilterKind::LinearStretch => "linear-stretch",
            FilterKind::Glass => "glass",
            FilterKind::VerticalWaves => "vertical-waves",
            FilterKind::HorizontalWaves => "horizontal-waves",
            FilterKind::Blur => "blur",
            FilterKind::Gauss => "gauss",
            FilterKind::Sharpen => "sharpen",
            FilterKind::MotionBlur => "motion-blur",
            FilterKind::Sobel => "sobel",
            FilterKind::Emboss => "emboss",
            FilterKind::Median => "median",
            FilterKind::Convolve => "convolve",
            FilterKind::Dilation => "dilation",
            FilterKind::Erosion => "erosion",
            FilterKind::Opening => "opening",
            FilterKind::Closing => "closing",
            FilterKind::TopHat => "top-hat",
        }
    }

    /// The morphological operation this kind runs, if any.
    pub fn morph_op(self) -> Option<MorphOp> {
        match self {
            FilterKind::Dilation => Some(MorphOp::Dilation),
            FilterKind::Erosion => Some(MorphOp::Erosion),
            FilterKind::Opening => Some(MorphOp::Opening),
            FilterKind::Closing => Some(MorphOp::Closing),
            FilterKind::TopHat => Some(MorphOp::TopHat),
            _ => None,
        }
    }

    /// Whether the filter reads [`FilterParams::kernel`].
    pub fn requires_kernel(self) -> bool {
        self == FilterKind::Convolve || self.morph_op().is_some()
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = ParseFilterKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        FilterKind::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ParseFilterKindError(s.to_string()))
    }
}

/// Tunable inputs shared by all filters
///
/// Each filter reads only the fields that concern it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParams {
    /// Sepia tint strength
    pub sepia_ratio: f32,
    /// Value added to every channel by the brightness filter
    pub brightness: i32,
    /// Gaussian kernel radius
    pub gauss_radius: u32,
    /// Gaussian standard deviation, must be positive
    pub gauss_sigma: f32,
    /// Side of the motion blur kernel, must be at least 1
    pub motion_length: u32,
    /// Kernel for `convolve` and the morphological filters
    pub kernel: Option<Kernel>,
    /// Seed for the glass filter; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for FilterParams {
    fn default() -> Self {
        FilterParams {
            sepia_ratio: DEFAULT_SEPIA_RATIO,
            brightness: DEFAULT_BRIGHTNESS,
            gauss_radius: DEFAULT_GAUSS_RADIUS,
            gauss_sigma: DEFAULT_GAUSS_SIGMA,
            motion_length: DEFAULT_MOTION_LENGTH,
            kernel: None,
            seed: None,
        }
    }
}

impl FilterParams {
    fn kernel_for(&self, kind: FilterKind) -> WorkerResult<&Kernel> {
        self.kernel.as_ref().ok_or(WorkerError::MissingKernel(kind))
    }
}

/// Configure the filter named by `kind` for `source`.
///
/// # Errors
///
/// Returns [`WorkerError::MissingKernel`] when a kernel-driven kind has no
/// kernel, and a filter error for out-of-range parameters.
pub fn build_filter(kind: FilterKind, params: &FilterParams, source: &Image) -> WorkerResult<Filter> {
    let filter = match kind {
        FilterKind::Invert => Filter::Invert,
        FilterKind::Grayscale => Filter::Grayscale,
        FilterKind::Sepia => Filter::sepia(params.sepia_ratio)?,
        FilterKind::Brightness => Filter::brightness(params.brightness),
        FilterKind::PerfectReflector => Filter::perfect_reflector(source),
        FilterKind::LinearStretch => Filter::linear_stretch(source),
        FilterKind::Glass => Filter::Glass { seed: params.seed },
        FilterKind::VerticalWaves => Filter::VerticalWaves,
        FilterKind::HorizontalWaves => Filter::HorizontalWaves,
        FilterKind::Blur => Filter::blur(),
        FilterKind::Gauss => Filter::gauss(params.gauss_radius, params.gauss_sigma)?,
        FilterKind::Sharpen => Filter::sharpen(),
        FilterKind::MotionBlur => Filter::motion_blur(params.motion_length)?,
        FilterKind::Sobel => Filter::Sobel,
        FilterKind::Emboss => Filter::Emboss,
        FilterKind::Median => Filter::Median,
        FilterKind::Convolve => Filter::Convolution(params.kernel_for(kind)?.clone()),
        FilterKind::Dilation => morphological(MorphOp::Dilation, kind, params)?,
        FilterKind::Erosion => morphological(MorphOp::Erosion, kind, params)?,
        FilterKind::Opening => morphological(MorphOp::Opening, kind, params)?,
        FilterKind::Closing => morphological(MorphOp::Closing, kind, params)?,
        FilterKind::TopHat => morphological(MorphOp::TopHat, kind, params)?,
    };
    Ok(filter)
}

fn morphological(op: MorphOp, kind: FilterKind, params: &FilterParams) -> WorkerResult<Filter> {
    Ok(Filter::morphological(op, params.kernel_for(kind)?)?)
}

/// Build the filter named by `kind` from `source` and run it.
pub fn run_filter(
    kind: FilterKind,
    params: &FilterParams,
    source: &Image,
    progress: &dyn ProgressSink,
) -> WorkerResult<Outcome> {
    let filter = build_filter(kind, params, source)?;
    debug!("{kind}: start on {}x{}", source.width(), source.height());
    let outcome = filter.process_image(source, progress)?;
    debug!("{kind}: finished, cancelled = {}", outcome.is_cancelled());
    Ok(outcome)
}
