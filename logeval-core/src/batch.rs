//! Evaluation of many (method, dataset) pairs
//!
//! A job whose inputs are malformed is recorded as failed and the batch
//! carries on. With the `parallel` feature, jobs are spread over the rayon
//! thread pool; outcomes always come back in job order.

use crate::evaluator::{Evaluator, EvaluatorConfig};
use crate::record::{keys, MetricsRecord};
use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One comparison to run
#[derive(Debug, Clone)]
pub struct EvaluationJob {
    /// Parsing method that produced the prediction
    pub method: String,
    /// Dataset the labels belong to
    pub dataset: String,
    /// Ground-truth label per line
    pub truth: Vec<String>,
    /// Predicted label per line
    pub pred: Vec<String>,
    /// Ground-truth file the labels came from
    pub gt_file: Option<String>,
    /// Prediction file the labels came from
    pub pred_file: Option<String>,
}

impl EvaluationJob {
    /// Create a job
    pub fn new(
        method: impl Into<String>,
        dataset: impl Into<String>,
        truth: Vec<String>,
        pred: Vec<String>,
    ) -> Self {
        Self {
            method: method.into(),
            dataset: dataset.into(),
            truth,
            pred,
            gt_file: None,
            pred_file: None,
        }
    }

    /// Record the files the labels were read from
    pub fn with_sources(mut self, gt_file: impl Into<String>, pred_file: impl Into<String>) -> Self {
        self.gt_file = Some(gt_file.into());
        self.pred_file = Some(pred_file.into());
        self
    }
}

/// Result of a single job
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobOutcome {
    /// Parsing method
    pub method: String,
    /// Dataset
    pub dataset: String,
    /// Metrics, or the reason the job failed
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub status: JobStatus,
    /// Fraction of lines a foreign tool reported as parsed
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub coverage: Option<f64>,
    /// Ground-truth file, when evaluated from disk
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub gt_file: Option<String>,
    /// Prediction file, when evaluated from disk
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub pred_file: Option<String>,
}

/// Success or failure of a job
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum JobStatus {
    /// Metrics computed
    Ok {
        /// Computed metrics
        metrics: MetricsRecord,
    },
    /// Job could not be evaluated
    Failed {
        /// Human-readable failure reason
        error: String,
    },
}

impl JobOutcome {
    /// Successful outcome
    pub fn ok(method: impl Into<String>, dataset: impl Into<String>, metrics: MetricsRecord) -> Self {
        Self {
            method: method.into(),
            dataset: dataset.into(),
            status: JobStatus::Ok { metrics },
            coverage: None,
            gt_file: None,
            pred_file: None,
        }
    }

    /// Failed outcome
    pub fn failed(
        method: impl Into<String>,
        dataset: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            dataset: dataset.into(),
            status: JobStatus::Failed {
                error: error.into(),
            },
            coverage: None,
            gt_file: None,
            pred_file: None,
        }
    }

    /// Attach the input files
    pub fn with_sources(mut self, gt_file: Option<String>, pred_file: Option<String>) -> Self {
        self.gt_file = gt_file;
        self.pred_file = pred_file;
        self
    }

    /// Attach a coverage figure reported by a foreign tool
    pub fn with_coverage(mut self, coverage: f64) -> Self {
        self.coverage = Some(coverage);
        self
    }

    /// Metrics of a successful job
    pub fn metrics(&self) -> Option<&MetricsRecord> {
        match &self.status {
            JobStatus::Ok { metrics } => Some(metrics),
            JobStatus::Failed { .. } => None,
        }
    }

    /// Failure reason of a failed job
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            JobStatus::Ok { .. } => None,
            JobStatus::Failed { error } => Some(error),
        }
    }

    /// Whether metrics were computed
    pub fn is_ok(&self) -> bool {
        self.metrics().is_some()
    }
}

/// Runs jobs through an [`Evaluator`]
#[derive(Debug, Clone, Copy)]
pub struct BatchEvaluator {
    evaluator: Evaluator,
    parallel: bool,
}

impl Default for BatchEvaluator {
    fn default() -> Self {
        Self::new(EvaluatorConfig::default())
    }
}

impl BatchEvaluator {
    /// Create a batch evaluator; parallel when the feature is enabled
    pub fn new(config: EvaluatorConfig) -> Self {
        Self {
            evaluator: Evaluator::new(config),
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Force sequential or parallel execution
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled && cfg!(feature = "parallel");
        self
    }

    /// Evaluate a single job, capturing failure as an outcome
    pub fn run_one(&self, job: &EvaluationJob) -> JobOutcome {
        let outcome = match self.evaluator.evaluate(&job.truth, &job.pred) {
            Ok(report) => {
                log::debug!(
                    "{}/{}: GA={:.3} PA={:.3} over {} lines",
                    job.method,
                    job.dataset,
                    report.strict.ga,
                    report.strict.pa,
                    report.lines
                );
                JobOutcome::ok(&job.method, &job.dataset, report.to_record())
            }
            Err(e) => {
                log::warn!("{}/{}: {}", job.method, job.dataset, e);
                JobOutcome::failed(&job.method, &job.dataset, e.to_string())
            }
        };
        outcome.with_sources(job.gt_file.clone(), job.pred_file.clone())
    }

    /// Evaluate every job; the output is index-aligned with `jobs`
    pub fn run(&self, jobs: &[EvaluationJob]) -> Vec<JobOutcome> {
        self.run_with_progress(jobs, |_| {})
    }

    /// Like [`run`](Self::run), calling `on_done` as each job finishes
    ///
    /// In parallel mode `on_done` is called from worker threads in completion
    /// order.
    pub fn run_with_progress<F>(&self, jobs: &[EvaluationJob], on_done: F) -> Vec<JobOutcome>
    where
        F: Fn(&JobOutcome) + Sync,
    {
        let run = |job: &EvaluationJob| {
            let outcome = self.run_one(job);
            on_done(&outcome);
            outcome
        };

        #[cfg(feature = "parallel")]
        if self.parallel {
            return jobs.par_iter().map(run).collect();
        }

        jobs.iter().map(run).collect()
    }
}

/// Aggregate view over a batch
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    /// Jobs that produced metrics
    pub succeeded: usize,
    /// Jobs that failed
    pub failed: usize,
    /// Per-method mean of each metric over successful jobs
    pub method_means: BTreeMap<String, MetricsRecord>,
}

impl BatchSummary {
    /// Summarise a list of outcomes
    pub fn from_outcomes(outcomes: &[JobOutcome]) -> Self {
        let mut succeeded = 0;
        let mut failed = 0;
        let mut sums: BTreeMap<&str, (BTreeMap<&'static str, f64>, usize)> = BTreeMap::new();

        for outcome in outcomes {
            let Some(metrics) = outcome.metrics() else {
                failed += 1;
                continue;
            };
            succeeded += 1;

            let (totals, count) = sums.entry(outcome.method.as_str()).or_default();
            *count += 1;
            for (key, value) in metrics {
                *totals.entry(key).or_insert(0.0) += value;
            }
        }

        let method_means = sums
            .into_iter()
            .map(|(method, (totals, count))| {
                let mut means = MetricsRecord::new();
                for key in keys::ALL {
                    if let Some(total) = totals.get(key) {
                        means.insert(key, total / count as f64);
                    }
                }
                (method.to_string(), means)
            })
            .collect();

        Self {
            succeeded,
            failed,
            method_means,
        }
    }
}
