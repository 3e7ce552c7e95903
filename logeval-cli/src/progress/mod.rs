//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress reporter for loading benchmark jobs
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Initialize progress bar over (method, dataset) pairs being loaded
    pub fn init_jobs(&mut self, total_jobs: u64) {
        self.start(total_jobs, "pairs loaded");
    }

    /// Initialize progress bar over loaded pairs being evaluated
    pub fn init_evaluation(&mut self, total_jobs: u64) {
        self.start(total_jobs, "pairs evaluated");
    }

    fn start(&mut self, total: u64, unit: &str) {
        self.progress_bar = None;
        if self.quiet || total == 0 {
            return;
        }

        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template(&format!(
                "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {unit} {{msg}}"
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a loaded pair
    pub fn job_loaded(&self, method: &str, dataset: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Loaded: {method}/{dataset}"));
            pb.inc(1);
        }
    }

    /// Update progress for an evaluated pair; safe to call from worker threads
    pub fn job_evaluated(&self, method: &str, dataset: &str) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Evaluated: {method}/{dataset}"));
            pb.inc(1);
        }
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }

    /// Whether a bar is being drawn
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }
}
