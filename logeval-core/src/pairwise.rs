//! Pairwise agreement metrics: Grouping Accuracy (GA) and Parsing Accuracy (PA)
//!
//! GA is the F1 score over unordered line pairs that share a cluster: a pair
//! is "parsed" when both lines carry the same predicted label, "real" when
//! they carry the same ground-truth label, and "accurate" when both hold.
//!
//! PA is the fraction of lines whose predicted cluster reconstructs one full
//! ground-truth cluster, no more and no fewer members.

use crate::counting::{frequencies, pair_total, ratio, row_size, Contingency};
use crate::error::{ensure_aligned, Result};
use std::hash::Hash;

/// Strict (or friendly, after collapsing) pairwise metrics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairwiseMetrics {
    /// Grouping accuracy: harmonic mean of precision and recall
    pub ga: f64,
    /// accurate_pairs / parsed_pairs
    pub ga_precision: f64,
    /// accurate_pairs / real_pairs
    pub ga_recall: f64,
    /// Parsing accuracy: accurate_events / lines
    pub pa: f64,
}

/// Raw pair and event counts behind [`PairwiseMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairCounts {
    /// Same-cluster pairs in the ground truth
    pub real_pairs: u64,
    /// Same-cluster pairs in the prediction
    pub parsed_pairs: u64,
    /// Pairs grouped together by both labelings
    pub accurate_pairs: u64,
    /// Lines inside predicted clusters that exactly match a ground-truth cluster
    pub accurate_events: u64,
    /// Number of lines compared
    pub lines: u64,
}

impl PairCounts {
    /// Count pairs and perfectly reconstructed events
    pub fn compute<T, P>(truth: &[T], pred: &[P]) -> Result<Self>
    where
        T: Eq + Hash,
        P: Eq + Hash,
    {
        ensure_aligned(truth, pred)?;

        let truth_counts = frequencies(truth);
        let real_pairs = pair_total(truth_counts.values().copied());
        let parsed_pairs = pair_total(frequencies(pred).values().copied());

        let mut accurate_pairs = 0;
        let mut accurate_events = 0;
        for (_, gt_counts) in Contingency::build(pred, truth).rows() {
            accurate_pairs += pair_total(gt_counts.values().copied());

            if gt_counts.len() == 1 {
                let size = row_size(gt_counts);
                let full_cluster = gt_counts
                    .keys()
                    .next()
                    .and_then(|gt| truth_counts.get(*gt))
                    .is_some_and(|&total| total == size);
                if full_cluster {
                    accurate_events += size as u64;
                }
            }
        }

        Ok(Self {
            real_pairs,
            parsed_pairs,
            accurate_pairs,
            accurate_events,
            lines: truth.len() as u64,
        })
    }

    /// Turn the counts into ratios, zero wherever a denominator is zero
    pub fn metrics(&self) -> PairwiseMetrics {
        let precision = ratio(self.accurate_pairs, self.parsed_pairs);
        let recall = ratio(self.accurate_pairs, self.real_pairs);
        let ga = if precision == 0.0 && recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };

        PairwiseMetrics {
            ga,
            ga_precision: precision,
            ga_recall: recall,
            pa: ratio(self.accurate_events, self.lines),
        }
    }
}

/// Compute GA, its precision and recall, and PA for one labeling pair
///
/// # Errors
///
/// [`EvalError::LengthMismatch`](crate::EvalError::LengthMismatch) when the
/// sequences differ in length.
///
/// # Example
///
/// ```
/// use logeval_core::accuracy_metrics;
///
/// let truth = ["A", "A", "B", "B", "B"];
/// let pred = ["X", "X", "Y", "Y", "Z"];
/// let m = accuracy_metrics(&truth, &pred).unwrap();
/// assert_eq!(m.ga_precision, 1.0);
/// assert_eq!(m.ga_recall, 0.5);
/// assert_eq!(m.pa, 0.4);
/// ```
pub fn accuracy_metrics<T, P>(truth: &[T], pred: &[P]) -> Result<PairwiseMetrics>
where
    T: Eq + Hash,
    P: Eq + Hash,
{
    Ok(PairCounts::compute(truth, pred)?.metrics())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EvalError;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_reference_scenario_counts() {
        let truth = ["A", "A", "B", "B", "B"];
        let pred = ["X", "X", "Y", "Y", "Z"];

        let counts = PairCounts::compute(&truth, &pred).unwrap();
        assert_eq!(counts.real_pairs, 4);
        assert_eq!(counts.parsed_pairs, 2);
        assert_eq!(counts.accurate_pairs, 2);
        assert_eq!(counts.accurate_events, 2);
        assert_eq!(counts.lines, 5);
    }

    #[test]
    fn test_reference_scenario_metrics() {
        let truth = ["A", "A", "B", "B", "B"];
        let pred = ["X", "X", "Y", "Y", "Z"];

        let m = accuracy_metrics(&truth, &pred).unwrap();
        assert_eq!(m.ga_precision, 1.0);
        assert_eq!(m.ga_recall, 0.5);
        assert!(approx(m.ga, 2.0 / 3.0));
        assert!(approx(m.pa, 0.4));
    }

    #[test]
    fn test_identity() {
        let labels = ["E1", "E2", "E1", "E3", "E3", "E3"];
        let m = accuracy_metrics(&labels, &labels).unwrap();
        assert_eq!(m.ga, 1.0);
        assert_eq!(m.ga_precision, 1.0);
        assert_eq!(m.ga_recall, 1.0);
        assert_eq!(m.pa, 1.0);
    }

    #[test]
    fn test_relabeling_invariance() {
        let truth = ["A", "A", "B", "C", "C"];
        let pred = [1, 1, 2, 3, 3];
        let m = accuracy_metrics(&truth, &pred).unwrap();
        assert_eq!(m.ga, 1.0);
        assert_eq!(m.pa, 1.0);
    }

    #[test]
    fn test_all_singletons() {
        // No same-cluster pairs on either side: GA is 0 by convention, but
        // every singleton reconstructs its ground-truth cluster.
        let truth = ["A", "B", "C"];
        let pred = ["X", "Y", "Z"];
        let m = accuracy_metrics(&truth, &pred).unwrap();
        assert_eq!(m.ga, 0.0);
        assert_eq!(m.ga_precision, 0.0);
        assert_eq!(m.ga_recall, 0.0);
        assert_eq!(m.pa, 1.0);
    }

    #[test]
    fn test_single_predicted_cluster() {
        let truth = ["A", "A", "B", "B"];
        let pred = ["X", "X", "X", "X"];
        let m = accuracy_metrics(&truth, &pred).unwrap();
        // parsed = 6, real = 2, accurate = 2
        assert!(approx(m.ga_precision, 1.0 / 3.0));
        assert_eq!(m.ga_recall, 1.0);
        assert!(approx(m.ga, 0.5));
        assert_eq!(m.pa, 0.0);
    }

    #[test]
    fn test_empty_string_sentinel_is_a_label() {
        let truth = ["", "", "A"];
        let pred = ["p", "p", "q"];
        let m = accuracy_metrics(&truth, &pred).unwrap();
        assert_eq!(m.ga, 1.0);
        assert_eq!(m.pa, 1.0);
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        let m = accuracy_metrics(&empty, &empty).unwrap();
        assert_eq!(m, PairwiseMetrics::default());
    }

    #[test]
    fn test_length_mismatch() {
        let err = accuracy_metrics(&["A", "B"], &["X"]).unwrap_err();
        assert_eq!(err, EvalError::LengthMismatch { truth: 2, pred: 1 });
    }
}
