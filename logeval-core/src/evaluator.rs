//! Full evaluation of one (truth, prediction) pair
//!
//! Strict metrics come from the raw labels. When enabled, pure clusters are
//! collapsed and the pairwise metrics are recomputed ("friendly"), and purity
//! is measured in both directions to separate over-merging from
//! over-splitting.

use crate::collapse::collapse_pure_clusters;
use crate::error::{ensure_aligned, Result};
use crate::pairwise::{accuracy_metrics, PairwiseMetrics};
use crate::purity::purity_metric;
use crate::record::{keys, MetricsRecord};
use std::hash::Hash;

/// Which optional metric families to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvaluatorConfig {
    /// Compute prediction and ground-truth purity
    pub purity: bool,
    /// Collapse pure clusters and compute friendly GA/PA
    pub collapse: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self::full()
    }
}

impl EvaluatorConfig {
    /// GA and PA only
    pub fn strict_only() -> Self {
        Self {
            purity: false,
            collapse: false,
        }
    }

    /// Every metric family
    pub fn full() -> Self {
        Self {
            purity: true,
            collapse: true,
        }
    }

    /// Enable or disable purity
    pub fn purity(mut self, enabled: bool) -> Self {
        self.purity = enabled;
        self
    }

    /// Enable or disable collapsing
    pub fn collapse(mut self, enabled: bool) -> Self {
        self.collapse = enabled;
        self
    }
}

/// All metrics computed for one pair
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationReport {
    /// Number of lines compared
    pub lines: usize,
    /// Metrics on the raw labels
    pub strict: PairwiseMetrics,
    /// Metrics after collapsing pure clusters
    pub friendly: Option<PairwiseMetrics>,
    /// Fraction of lines in pure predicted clusters
    pub pure_coverage: Option<f64>,
    /// Purity of predicted clusters against the ground truth
    pub pred_purity: Option<f64>,
    /// Purity of ground-truth clusters against the prediction
    pub gt_purity: Option<f64>,
}

impl EvaluationReport {
    /// Flatten into a [`MetricsRecord`]
    pub fn to_record(&self) -> MetricsRecord {
        let mut record = MetricsRecord::new()
            .with(keys::GA, self.strict.ga)
            .with(keys::GA_PRECISION, self.strict.ga_precision)
            .with(keys::GA_RECALL, self.strict.ga_recall)
            .with(keys::PA, self.strict.pa);

        if let Some(friendly) = &self.friendly {
            record.insert(keys::GA_FRIENDLY, friendly.ga);
            record.insert(keys::GA_FRIENDLY_PRECISION, friendly.ga_precision);
            record.insert(keys::GA_FRIENDLY_RECALL, friendly.ga_recall);
            record.insert(keys::PA_FRIENDLY, friendly.pa);
        }
        if let Some(v) = self.pred_purity {
            record.insert(keys::PRED_PURE, v);
        }
        if let Some(v) = self.gt_purity {
            record.insert(keys::GT_PURE, v);
        }
        if let Some(v) = self.pure_coverage {
            record.insert(keys::PURE_COVERAGE, v);
        }
        record
    }
}

impl From<&EvaluationReport> for MetricsRecord {
    fn from(report: &EvaluationReport) -> Self {
        report.to_record()
    }
}

/// Stateless composition of the individual evaluators
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Create an evaluator with the given configuration
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate one aligned pair of label sequences
    pub fn evaluate<T, P>(&self, truth: &[T], pred: &[P]) -> Result<EvaluationReport>
    where
        T: Eq + Hash,
        P: Eq + Hash,
    {
        ensure_aligned(truth, pred)?;

        let strict = accuracy_metrics(truth, pred)?;

        let (friendly, pure_coverage) = if self.config.collapse {
            let collapsed = collapse_pure_clusters(truth, pred)?;
            let friendly = accuracy_metrics(truth, &collapsed.labels)?;
            (Some(friendly), Some(collapsed.pure_coverage))
        } else {
            (None, None)
        };

        let (pred_purity, gt_purity) = if self.config.purity {
            (
                Some(purity_metric(pred, truth)?),
                Some(purity_metric(truth, pred)?),
            )
        } else {
            (None, None)
        };

        Ok(EvaluationReport {
            lines: truth.len(),
            strict,
            friendly,
            pure_coverage,
            pred_purity,
            gt_purity,
        })
    }
}

/// Evaluate with every metric family enabled
pub fn evaluate<T, P>(truth: &[T], pred: &[P]) -> Result<EvaluationReport>
where
    T: Eq + Hash,
    P: Eq + Hash,
{
    Evaluator::default().evaluate(truth, pred)
}
