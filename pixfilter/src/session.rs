//! Editing session
//!
//! A [`Session`] holds the committed image, the filter parameters and the
//! kernel authoring text, and runs filters on a [`FilterWorker`]. The
//! committed image is replaced only when a pass completes; a cancelled or
//! failed pass leaves it as it was.

use crate::error::{WorkerError, WorkerResult};
use crate::orchestrator::{FilterKind, FilterParams};
use crate::worker::{FilterWorker, WorkerEvent};
use log::{info, warn};
use pixfilter_core::{Image, Kernel, Outcome};
use pixfilter_io::ImageFormat;
use std::path::Path;

/// State of the session after draining worker events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No pass is running
    Idle,
    /// A pass is running and has reported this percentage
    Running(u8),
    /// A pass completed and its image is now the committed image
    Committed,
    /// A pass was cancelled; the committed image is unchanged
    Cancelled,
}

/// Committed image plus the worker that filters it
pub struct Session {
    image: Option<Image>,
    params: FilterParams,
    kernel_text: String,
    running: Option<FilterKind>,
    progress: u8,
    worker: FilterWorker,
}

impl Session {
    /// Create a session with no image.
    pub fn new() -> Self {
        Session {
            image: None,
            params: FilterParams::default(),
            kernel_text: String::new(),
            running: None,
            progress: 0,
            worker: FilterWorker::new(),
        }
    }

    /// Create a session around an existing image.
    pub fn with_image(image: Image) -> Self {
        let mut session = Self::new();
        session.image = Some(image);
        session
    }

    /// Create a session from an image file.
    pub fn open<P: AsRef<Path>>(path: P) -> WorkerResult<Self> {
        Ok(Self::with_image(pixfilter_io::read_image(path)?))
    }

    /// The committed image.
    pub fn image(&self) -> Option<&Image> {
        self.image.as_ref()
    }

    /// Replace the committed image.
    pub fn set_image(&mut self, image: Image) {
        self.image = Some(image);
    }

    /// Load a new committed image from a file.
    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> WorkerResult<()> {
        self.image = Some(pixfilter_io::read_image(path)?);
        Ok(())
    }

    /// Write the committed image to a file.
    pub fn save_image<P: AsRef<Path>>(&self, path: P, format: ImageFormat) -> WorkerResult<()> {
        let image = self.image.as_ref().ok_or(WorkerError::NoImage)?;
        pixfilter_io::write_image(image, path, format)?;
        Ok(())
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn params_mut(&mut self) -> &mut FilterParams {
        &mut self.params
    }

    /// The kernel text last accepted by [`Session::set_kernel_text`].
    pub fn kernel_text(&self) -> &str {
        &self.kernel_text
    }

    /// Parse `text` and make it the kernel for kernel-driven filters.
    ///
    /// On a parse error the previous kernel and text are kept.
    pub fn set_kernel_text(&mut self, text: &str) -> WorkerResult<()> {
        let kernel = Kernel::parse(text)?;
        self.params.kernel = Some(kernel);
        self.kernel_text = text.to_string();
        Ok(())
    }

    /// Load kernel text from a file.
    pub fn load_kernel<P: AsRef<Path>>(&mut self, path: P) -> WorkerResult<()> {
        let text = pixfilter_io::read_kernel_text(path)?;
        self.set_kernel_text(&text)
    }

    /// Store the current kernel text in a file.
    pub fn save_kernel<P: AsRef<Path>>(&self, path: P) -> WorkerResult<()> {
        pixfilter_io::write_kernel_text(path, &self.kernel_text)?;
        Ok(())
    }

    /// Start `kind` on the committed image.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::NoImage`] without an image and
    /// [`WorkerError::Busy`] while another pass runs.
    pub fn apply(&mut self, kind: FilterKind) -> WorkerResult<()> {
        let source = self.image.clone().ok_or(WorkerError::NoImage)?;
        if self.running.is_some() {
            return Err(WorkerError::Busy);
        }
        self.worker.submit(kind, self.params.clone(), source)?;
        self.running = Some(kind);
        self.progress = 0;
        Ok(())
    }

    /// Request cancellation of the running pass.
    pub fn cancel(&self) {
        self.worker.cancel();
    }

    /// Whether a pass is running.
    pub fn is_busy(&self) -> bool {
        self.running.is_some()
    }

    /// Drain pending worker events without blocking.
    pub fn poll(&mut self) -> WorkerResult<SessionStatus> {
        while let Some(event) = self.worker.try_recv()? {
            if let Some(status) = self.handle(event)? {
                return Ok(status);
            }
        }
        Ok(match self.running {
            Some(_) => SessionStatus::Running(self.progress),
            None => SessionStatus::Idle,
        })
    }

    /// Block until the running pass ends.
    pub fn wait(&mut self) -> WorkerResult<SessionStatus> {
        self.wait_with(|_| {})
    }

    /// Block until the running pass ends, handing each progress report to
    /// `on_progress`.
    pub fn wait_with<F: FnMut(u8)>(&mut self, mut on_progress: F) -> WorkerResult<SessionStatus> {
        if self.running.is_none() {
            return Ok(SessionStatus::Idle);
        }
        loop {
            let event = self.worker.recv()?;
            if let WorkerEvent::Progress(percent) = event {
                on_progress(percent);
            }
            if let Some(status) = self.handle(event)? {
                return Ok(status);
            }
        }
    }

    fn handle(&mut self, event: WorkerEvent) -> WorkerResult<Option<SessionStatus>> {
        let kind = match self.running {
            Some(kind) => kind,
            None => {
                warn!("ignoring worker event with no pass running: {event:?}");
                return Ok(None);
            }
        };
        match event {
            WorkerEvent::Progress(percent) => {
                self.progress = percent;
                Ok(None)
            }
            WorkerEvent::Finished(result) => {
                self.running = None;
                match result? {
                    Outcome::Completed(image) => {
                        info!("{kind}: committed {}x{} image", image.width(), image.height());
                        self.image = Some(image);
                        Ok(Some(SessionStatus::Committed))
                    }
                    Outcome::Cancelled => {
                        info!("{kind}: cancelled, keeping previous image");
                        Ok(Some(SessionStatus::Cancelled))
                    }
                }
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
