//! Background filter worker
//!
//! [`FilterWorker`] owns one thread that runs one filter pass at a time.
//! The owner submits a job, reads [`WorkerEvent`]s back over a channel and
//! may cancel the running pass through a shared [`CancelToken`]. The
//! worker never touches the caller's image: it filters a shared clone of it
//! and hands a new image back in [`WorkerEvent::Finished`].
//!
//! The worker stays busy until the owner has received `Finished`, so every
//! event the owner reads belongs to the most recently submitted pass.

use crate::error::{WorkerError, WorkerResult};
use crate::orchestrator::{FilterKind, FilterParams, run_filter};
use log::{debug, warn};
use pixfilter_core::{CancelToken, Image, Outcome, ProgressSink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

/// Message sent from the worker thread to its owner
#[derive(Debug)]
pub enum WorkerEvent {
    /// Percentage of the running pass completed so far
    Progress(u8),
    /// The pass ended; `Ok(Outcome::Cancelled)` when it was cancelled
    Finished(WorkerResult<Outcome>),
}

struct Job {
    kind: FilterKind,
    params: FilterParams,
    source: Image,
}

/// Forwards progress over the event channel and reads the cancel flag.
struct ChannelSink {
    events: Sender<WorkerEvent>,
    cancel: CancelToken,
}

impl ProgressSink for ChannelSink {
    fn report_progress(&self, percent: u8) {
        // Owner may have stopped listening
        let _ = self.events.send(WorkerEvent::Progress(percent));
    }

    fn is_cancellation_requested(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Single-thread filter runner
///
/// # Examples
///
/// ```
/// use pixfilter::{FilterKind, FilterParams, FilterWorker, Image};
///
/// let mut worker = FilterWorker::new();
/// let img = Image::new(16, 16).unwrap();
/// worker.submit(FilterKind::Invert, FilterParams::default(), img).unwrap();
/// let out = worker.wait().unwrap().into_image().unwrap();
/// assert_eq!(out.dimensions(), (16, 16));
/// ```
pub struct FilterWorker {
    jobs: Option<Sender<Job>>,
    events: Receiver<WorkerEvent>,
    cancel: CancelToken,
    busy: AtomicBool,
    handle: Option<JoinHandle<()>>,
}

impl FilterWorker {
    /// Start the worker thread.
    pub fn new() -> Self {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancelToken::new();

        let handle = {
            let cancel = cancel.clone();
            thread::spawn(move || worker_loop(job_rx, event_tx, cancel))
        };

        FilterWorker {
            jobs: Some(job_tx),
            events: event_rx,
            cancel,
            busy: AtomicBool::new(false),
            handle: Some(handle),
        }
    }

    /// Queue a pass of `kind` over `source`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Busy`] until the previous pass's
    /// [`WorkerEvent::Finished`] has been received, and [`WorkerError::Disconnected`] if the thread has exited.
    pub fn submit(&mut self, kind: FilterKind, params: FilterParams, source: Image) -> WorkerResult<()> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(WorkerError::Busy);
        }
        self.cancel.reset();
        let sent = match &self.jobs {
            Some(jobs) => jobs.send(Job { kind, params, source }).is_ok(),
            None => false,
        };
        if !sent {
            self.busy.store(false, Ordering::SeqCst);
            return Err(WorkerError::Disconnected);
        }
        Ok(())
    }

    /// Ask the running pass to stop at its next checkpoint.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether a submitted pass's `Finished` event has not been received yet.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Next pending event, without blocking.
    pub fn try_recv(&self) -> WorkerResult<Option<WorkerEvent>> {
        match self.events.try_recv() {
            Ok(event) => Ok(Some(self.observe(event))),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(WorkerError::Disconnected),
        }
    }

    /// Next event, blocking until one arrives.
    pub fn recv(&self) -> WorkerResult<WorkerEvent> {
        self.events
            .recv()
            .map(|event| self.observe(event))
            .map_err(|_| WorkerError::Disconnected)
    }

    fn observe(&self, event: WorkerEvent) -> WorkerEvent {
        if matches!(event, WorkerEvent::Finished(_)) {
            self.busy.store(false, Ordering::SeqCst);
        }
        event
    }

    /// Block until the running pass finishes, skipping progress events.
    pub fn wait(&self) -> WorkerResult<Outcome> {
        self.wait_with(|_| {})
    }

    /// Block until the running pass finishes, handing each progress event to
    /// `on_progress`.
    pub fn wait_with<F: FnMut(u8)>(&self, mut on_progress: F) -> WorkerResult<Outcome> {
        loop {
            match self.recv()? {
                WorkerEvent::Progress(percent) => on_progress(percent),
                WorkerEvent::Finished(result) => return result,
            }
        }
    }
}

impl Default for FilterWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for FilterWorker {
    fn drop(&mut self) {
        self.cancel.cancel();
        // Closing the job channel ends the thread's receive loop
        self.jobs.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("filter worker thread panicked");
        }
    }
}

fn worker_loop(
    jobs: Receiver<Job>,
    events: Sender<WorkerEvent>,
    cancel: CancelToken,
) {
    debug!("filter worker started");
    for job in jobs {
        let sink = ChannelSink {
            events: events.clone(),
            cancel: cancel.clone(),
        };
        let result = run_filter(job.kind, &job.params, &job.source, &sink);
        if events.send(WorkerEvent::Finished(result)).is_err() {
            warn!("{}: result dropped, owner is gone", job.kind);
        }
    }
    debug!("filter worker stopped");
}
