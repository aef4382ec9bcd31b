//! Progress reporting and cooperative cancellation
//!
//! Every filter pass receives a [`ProgressSink`]. The pass reports a
//! completion percentage as it goes and polls the sink for a cancellation
//! request at fixed points (once per column for per-pixel filters, once per
//! row for morphology). A cancelled pass returns [`Outcome::Cancelled`] and
//! never hands back a partially written image.

use crate::image::Image;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Receiver of progress updates and source of cancellation requests.
///
/// Implementations must be cheap to call: `report_progress` runs once per
/// scan line and must not block.
pub trait ProgressSink {
    /// Record that the running pass is `percent` (0..=100) complete.
    fn report_progress(&self, percent: u8);

    /// Whether the running pass should stop at its next checkpoint.
    fn is_cancellation_requested(&self) -> bool;
}

/// A sink that discards progress and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report_progress(&self, _percent: u8) {}

    fn is_cancellation_requested(&self) -> bool {
        false
    }
}

/// Shared cancellation flag.
///
/// Clones share the same flag, so a token handed to a worker thread can be
/// cancelled from the thread that owns the original.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clear a previous request so the token can be reused.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

impl ProgressSink for CancelToken {
    fn report_progress(&self, _percent: u8) {}

    fn is_cancellation_requested(&self) -> bool {
        self.is_cancelled()
    }
}

/// Terminal state of a pass that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The pass ran to the end and produced a new image.
    Completed(Image),
    /// The pass stopped at a checkpoint after cancellation was requested.
    Cancelled,
}

impl Outcome {
    /// Whether the pass was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled)
    }

    /// The produced image, if the pass completed.
    pub fn into_image(self) -> Option<Image> {
        match self {
            Outcome::Completed(img) => Some(img),
            Outcome::Cancelled => None,
        }
    }

    /// Borrow the produced image, if the pass completed.
    pub fn image(&self) -> Option<&Image> {
        match self {
            Outcome::Completed(img) => Some(img),
            Outcome::Cancelled => None,
        }
    }
}
