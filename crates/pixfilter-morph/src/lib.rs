//! pixfilter-morph - Morphological operations for image filtering
//!
//! This crate provides:
//!
//! - Structuring elements ([`Sel`]) built from kernels or as bricks
//! - Dilation, erosion, opening, closing and top-hat over the red channel
//!   of an RGB image, written back as gray
//!
//! Every operation takes a [`ProgressSink`](pixfilter_core::ProgressSink)
//! and returns an [`Outcome`](pixfilter_core::Outcome), so a long pass can
//! be observed and cancelled.

mod error;
pub mod grayscale;
pub mod sel;

pub use error::{MorphError, MorphResult};
pub use grayscale::{close, dilate, erode, open, top_hat};
pub use sel::{Sel, SelElement};
