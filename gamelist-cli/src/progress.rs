//! Progress bar for batch imports and merges.

use indicatif::{ProgressBar, ProgressStyle};

use gamelist_import::ImportProgress;

/// Renders batch progress as an indicatif bar; phase messages go to the log.
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub(crate) fn new(label: &str) -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template("  {msg:.cyan} [{bar:30}] {pos}/{len} ({eta})")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        bar.set_message(label.to_string());
        Self { bar }
    }
}

impl ImportProgress for BarProgress {
    fn on_batch(&self, processed: usize, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(processed as u64);
    }

    fn on_phase(&self, message: &str) {
        self.bar.suspend(|| log::info!("{}", message));
    }

    fn on_complete(&self, message: &str) {
        self.bar.finish_and_clear();
        log::debug!("{}", message);
    }
}
