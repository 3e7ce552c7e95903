//! Cluster purity

use crate::counting::{ratio, Contingency};
use crate::error::{ensure_aligned, Result};
use std::hash::Hash;

/// Weighted dominant-label ratio of `base` clusters against `other`
///
/// For each distinct `base` label, the lines carrying it are distributed
/// over `other` labels and the largest share is kept. The result is the sum
/// of those maxima over the number of lines, `0.0` for empty input.
///
/// `purity_metric(pred, truth)` scores over-merging (prediction purity),
/// `purity_metric(truth, pred)` scores over-splitting (ground-truth purity).
pub fn purity_metric<B, O>(base: &[B], other: &[O]) -> Result<f64>
where
    B: Eq + Hash,
    O: Eq + Hash,
{
    ensure_aligned(base, other)?;

    let table = Contingency::build(base, other);
    let dominant: usize = table
        .rows()
        .map(|(_, dist)| dist.values().copied().max().unwrap_or(0))
        .sum();

    Ok(ratio(dominant as u64, table.total() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prediction_and_ground_truth_purity() {
        let truth = ["A", "A", "B", "B", "B"];
        let pred = ["X", "X", "Y", "Y", "Y"];
        assert_eq!(purity_metric(&pred, &truth).unwrap(), 1.0);
        assert_eq!(purity_metric(&truth, &pred).unwrap(), 1.0);

        // One predicted cluster swallows everything
        let merged = ["M"; 5];
        assert_eq!(purity_metric(&merged, &truth).unwrap(), 0.6);
        assert_eq!(purity_metric(&truth, &merged).unwrap(), 1.0);
    }

    #[test]
    fn test_over_splitting_hurts_only_ground_truth_purity() {
        let truth = ["A", "A", "A", "A"];
        let pred = ["X", "X", "Y", "Z"];
        assert_eq!(purity_metric(&pred, &truth).unwrap(), 1.0);
        assert_eq!(purity_metric(&truth, &pred).unwrap(), 0.5);
    }

    #[test]
    fn test_self_purity() {
        let labels = ["a", "b", "c", "a"];
        assert_eq!(purity_metric(&labels, &labels).unwrap(), 1.0);
    }

    #[test]
    fn test_empty_input() {
        let empty: [&str; 0] = [];
        assert_eq!(purity_metric(&empty, &empty).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(purity_metric(&["a"], &["b", "c"]).is_err());
    }
}
