//! Collapsing of harmlessly over-split predicted clusters
//!
//! A parser that splits one true template into several predicted clusters,
//! each containing lines of a single ground-truth cluster only, has not mixed
//! anything up. Collapsing relabels every such pure cluster after its
//! ground-truth id so the pairwise metrics can be recomputed in a forgiving
//! ("friendly") mode.

use crate::counting::{ratio, Contingency};
use crate::error::{ensure_aligned, Result};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Prefix used when a merged label is rendered as text
pub const PURE_LABEL_PREFIX: &str = "__PURE__#";

/// Predicted label after collapsing
///
/// Merged and kept labels live in separate variants, so a merged label never
/// compares equal to a literal predicted id even if their texts coincide.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum CollapsedLabel<'a, T, P> {
    /// Canonical cluster of all pure predicted clusters of one ground-truth id
    Pure(&'a T),
    /// Predicted label of a cluster that mixes several ground-truth ids
    Kept(&'a P),
}

// Only references are held, so copying never requires `T: Copy`.
impl<T, P> Clone for CollapsedLabel<'_, T, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, P> Copy for CollapsedLabel<'_, T, P> {}

impl<T, P> CollapsedLabel<'_, T, P> {
    /// Whether this line was part of a pure predicted cluster
    pub fn is_pure(&self) -> bool {
        matches!(self, CollapsedLabel::Pure(_))
    }
}

impl<T: fmt::Display, P: fmt::Display> fmt::Display for CollapsedLabel<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollapsedLabel::Pure(gt) => write!(f, "{PURE_LABEL_PREFIX}{gt}"),
            CollapsedLabel::Kept(pred) => write!(f, "{pred}"),
        }
    }
}

/// Result of [`collapse_pure_clusters`]
#[derive(Debug, Clone, PartialEq)]
pub struct Collapsed<'a, T, P> {
    /// One label per line, index-aligned with the input
    pub labels: Vec<CollapsedLabel<'a, T, P>>,
    /// Fraction of lines whose predicted cluster was pure
    pub pure_coverage: f64,
}

impl<T: fmt::Display, P: fmt::Display> Collapsed<'_, T, P> {
    /// Render the merged labels as strings, e.g. for export
    pub fn to_strings(&self) -> Vec<String> {
        self.labels.iter().map(ToString::to_string).collect()
    }
}

/// Merge every pure predicted cluster into one cluster per ground-truth id
///
/// Predicted clusters whose lines all share one ground-truth label become
/// [`CollapsedLabel::Pure`]; mixed clusters keep their label.
pub fn collapse_pure_clusters<'a, T, P>(
    truth: &'a [T],
    pred: &'a [P],
) -> Result<Collapsed<'a, T, P>>
where
    T: Eq + Hash,
    P: Eq + Hash,
{
    ensure_aligned(truth, pred)?;

    let table = Contingency::build(pred, truth);
    let mapping: HashMap<&P, CollapsedLabel<'a, T, P>> = table
        .rows()
        .map(|(p, gts)| {
            let merged = match gts.keys().next() {
                Some(only_gt) if gts.len() == 1 => CollapsedLabel::Pure(*only_gt),
                _ => CollapsedLabel::Kept(p),
            };
            (p, merged)
        })
        .collect();

    let mut pure_lines = 0u64;
    let mut labels = Vec::with_capacity(pred.len());
    for p in pred {
        // every predicted label is a row of the table
        let merged = mapping.get(p).copied().unwrap_or(CollapsedLabel::Kept(p));
        if merged.is_pure() {
            pure_lines += 1;
        }
        labels.push(merged);
    }

    Ok(Collapsed {
        labels,
        pure_coverage: ratio(pure_lines, pred.len() as u64),
    })
}
