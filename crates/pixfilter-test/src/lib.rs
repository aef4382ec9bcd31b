//! pixfilter-test - Regression test framework for pixfilter
//!
//! Provides [`RegParams`], an index-counted checker that records every
//! failed comparison and reports them together, plus synthetic input
//! images in [`fixtures`].
//!
//! # Usage
//!
//! ```ignore
//! use pixfilter_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("median");
//! let img = fixtures::solid(8, 8, Rgb::WHITE).expect("fixture");
//! rp.compare_image(&img, &filtered);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"; display mode
//!   also writes images passed to [`RegParams::write_image`] to `tests/regout`

mod error;
pub mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pixfilter-test is at crates/pixfilter-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
