//! Progress reporting and cooperative cancellation.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tracing::info;

/// Phase of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStage {
    /// Extracting metadata, counted in files.
    Reading,
    /// Merging, counted in groups.
    Processing,
    /// Copying renamed files, counted in copies.
    Finalizing,
}

impl ProcessingStage {
    pub fn label(&self) -> &'static str {
        match self {
            ProcessingStage::Reading => "reading",
            ProcessingStage::Processing => "processing",
            ProcessingStage::Finalizing => "finalizing",
        }
    }
}

impl fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receiver for progress updates and log lines from a batch run.
pub trait ProgressSink {
    /// Called after each step with a 1-based `current` out of `total`.
    fn progress(&self, stage: ProcessingStage, current: usize, total: usize);

    /// A human-readable line about the run.
    fn log(&self, message: &str);
}

/// Sink that forwards log lines to `tracing` and ignores progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn progress(&self, _stage: ProcessingStage, _current: usize, _total: usize) {}

    fn log(&self, message: &str) {
        info!("{}", message);
    }
}

/// Shared flag checked between files.
///
/// Cancelling never interrupts a file that is already being read or copied.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
