//! pixfilter - Image filter engine for Rust
//!
//! # Overview
//!
//! pixfilter applies one filter at a time to an 8-bit RGB image:
//!
//! - Point filters (invert, grayscale, sepia, brightness)
//! - Convolution (blur, Gaussian, sharpen, motion blur, Sobel, emboss, custom kernels)
//! - Two-pass statistics filters (perfect reflector, linear stretch)
//! - Geometric remaps (glass, vertical and horizontal waves)
//! - Grayscale morphology (dilation, erosion, opening, closing, top-hat)
//! - 3x3 median
//!
//! Every pass reports progress and can be cancelled. Passes run either
//! synchronously through [`run_filter`] or on a background [`FilterWorker`];
//! a [`Session`] keeps the committed image and only replaces it when a pass
//! completes.
//!
//! # Example
//!
//! ```
//! use pixfilter::{FilterKind, FilterParams, Image, NoProgress, Rgb, run_filter};
//!
//! let img = Image::filled(8, 8, Rgb::new(10, 20, 30)).unwrap();
//! let out = run_filter(FilterKind::Invert, &FilterParams::default(), &img, &NoProgress)
//!     .unwrap()
//!     .into_image()
//!     .unwrap();
//! assert_eq!(out.get_pixel(0, 0), Some(Rgb::new(245, 235, 225)));
//! ```

mod error;
pub mod orchestrator;
pub mod session;
pub mod worker;

// Re-export core types (primary data structures used everywhere)
pub use pixfilter_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pixfilter_filter as filter;
pub use pixfilter_io as io;
pub use pixfilter_morph as morph;

pub use error::{ParseFilterKindError, WorkerError, WorkerResult};
pub use orchestrator::{FilterKind, FilterParams, build_filter, run_filter};
pub use session::{Session, SessionStatus};
pub use worker::{FilterWorker, WorkerEvent};
