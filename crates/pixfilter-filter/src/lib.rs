//! pixfilter-filter - Image filtering operations
//!
//! This crate provides the filter engine:
//!
//! - A column-major per-pixel driver with progress and cancellation
//! - Point filters (invert, grayscale, sepia, brightness)
//! - Convolution with arbitrary kernels, plus Sobel and emboss
//! - Two-pass statistics filters (perfect reflector, linear stretch)
//! - Geometric remaps (glass, waves)
//! - The 3x3 median filter
//! - [`Filter`], the sum type over all of the above and the
//!   morphological operations from `pixfilter-morph`
//!
//! Every filter reads an [`Image`](pixfilter_core::Image), writes a fresh
//! one, and returns an [`Outcome`](pixfilter_core::Outcome).

pub mod convolve;
pub mod driver;
mod error;
pub mod filter;
pub mod point;
pub mod rank;
pub mod stats;
pub mod warp;

pub use error::{FilterError, FilterResult};
pub use filter::{Filter, MorphOp};
pub use pixfilter_core::Kernel;

// Re-export commonly used functions
pub use convolve::{box_blur, convolve, emboss, gaussian_blur, motion_blur, sharpen, sobel};
pub use driver::for_each_pixel;
pub use point::{brightness, grayscale, invert, sepia};
pub use rank::median_filter;
pub use stats::{ChannelStats, LinearStretch, PerfectReflector, analyze, linear_stretch, perfect_reflector};
pub use warp::{glass, glass_with_rng, horizontal_waves, vertical_waves};
