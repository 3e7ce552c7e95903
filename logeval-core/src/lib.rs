//! Clustering-accuracy evaluation for log parsers
//!
//! Given a ground-truth cluster id and a predicted cluster id for every log
//! line, this crate computes:
//!
//! - **Grouping Accuracy (GA)**: pairwise F1 over same-cluster line pairs,
//!   with its precision and recall.
//! - **Parsing Accuracy (PA)**: fraction of lines whose predicted cluster
//!   reconstructs a full ground-truth cluster.
//! - **Purity** of either labeling against the other.
//! - **Friendly GA/PA**, after collapsing predicted clusters that are wholly
//!   contained in one ground-truth cluster.
//!
//! Everything is a pure function over borrowed label slices; labels may be
//! any `Eq + Hash` type.
//!
//! ```
//! use logeval_core::{evaluate, record::keys};
//!
//! let truth = ["A", "A", "B", "B", "B"];
//! let pred = ["X", "X", "Y", "Y", "Z"];
//!
//! let record = evaluate(&truth, &pred).unwrap().to_record();
//! assert_eq!(record.get(keys::PA), Some(0.4));
//! assert_eq!(record.get(keys::PA_FRIENDLY), Some(1.0));
//! ```

#![warn(missing_docs)]

pub mod batch;
pub mod collapse;
pub mod counting;
pub mod error;
pub mod evaluator;
pub mod pairwise;
pub mod purity;
pub mod record;

// Re-export key types
pub use batch::{BatchEvaluator, BatchSummary, EvaluationJob, JobOutcome, JobStatus};
pub use collapse::{collapse_pure_clusters, Collapsed, CollapsedLabel};
pub use counting::comb2;
pub use error::{EvalError, Result};
pub use evaluator::{evaluate, EvaluationReport, Evaluator, EvaluatorConfig};
pub use pairwise::{accuracy_metrics, PairCounts, PairwiseMetrics};
pub use purity::purity_metric;
pub use record::MetricsRecord;
