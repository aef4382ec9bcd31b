//! pixfilter-core - Basic data structures for image filtering
//!
//! This crate provides the types shared by every other pixfilter crate:
//!
//! - [`Image`] / [`ImageMut`] - The RGB raster container (immutable / mutable)
//! - [`Rgb`] and [`clamp`] - Pixel values and channel clamping
//! - [`Kernel`] - Weight grids, their text format and the built-in kernels
//! - [`ProgressSink`] / [`CancelToken`] / [`Outcome`] - Progress reporting
//!   and cooperative cancellation for long-running passes

pub mod error;
pub mod image;
pub mod kernel;
pub mod progress;

pub use error::{Error, Result};
pub use image::{Image, ImageMut, Rgb, clamp};
pub use kernel::Kernel;
pub use progress::{CancelToken, NoProgress, Outcome, ProgressSink};
