//! Error types for the pixfilter umbrella crate

use crate::orchestrator::FilterKind;
use thiserror::Error;

/// Errors raised while building, scheduling or committing a filter pass
#[derive(Debug, Error)]
pub enum WorkerError {
    /// Filter construction or processing error
    #[error("filter error: {0}")]
    Filter(#[from] pixfilter_filter::FilterError),

    /// Image or kernel file error
    #[error("I/O error: {0}")]
    Io(#[from] pixfilter_io::IoError),

    /// Core library error (kernel parsing, image construction)
    #[error("core error: {0}")]
    Core(#[from] pixfilter_core::Error),

    /// A kernel-driven filter was requested without a kernel
    #[error("filter '{0}' requires a kernel")]
    MissingKernel(FilterKind),

    /// A pass is already running on the worker
    #[error("a filter pass is already running")]
    Busy,

    /// The session has no image to filter
    #[error("no image loaded")]
    NoImage,

    /// The worker thread is gone
    #[error("worker thread disconnected")]
    Disconnected,
}

/// Result type for orchestrator, worker and session operations
pub type WorkerResult<T> = Result<T, WorkerError>;

/// Error returned when a filter name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter '{0}'")]
pub struct ParseFilterKindError(pub String);
