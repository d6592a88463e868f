//! Import and merge progress reporting.

/// Trait for receiving progress updates from the engines.
pub trait ImportProgress {
    /// Called after each committed batch with the rows processed so far in
    /// the slice and the slice length.
    fn on_batch(&self, processed: usize, total: usize);

    /// Called when a phase starts (e.g., "Merging snes from complete.xml").
    fn on_phase(&self, message: &str);

    /// Called when the call is complete.
    fn on_complete(&self, message: &str);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_batch(&self, _processed: usize, _total: usize) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_batch(&self, processed: usize, total: usize) {
        log::info!("  [{}/{}]", processed, total);
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
