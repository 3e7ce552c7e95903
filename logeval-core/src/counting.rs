//! Shared counting and combinatorics helpers
//!
//! Every evaluator reduces its two label sequences to the same structure: a
//! contingency table that maps each label of one sequence to the distribution
//! of labels it co-occurs with in the other. Labels are grouped by value
//! equality, so any `Eq + Hash` label type works.

use std::collections::HashMap;
use std::hash::Hash;

/// Number of unordered pairs among `c` items, `c·(c−1)/2`
///
/// Computed in `u64` so corpus-sized clusters cannot overflow on 32-bit
/// targets.
#[inline]
pub fn comb2(c: usize) -> u64 {
    if c < 2 {
        return 0;
    }
    let c = c as u64;
    c * (c - 1) / 2
}

/// Sum of [`comb2`] over a collection of cluster sizes
pub fn pair_total<I>(sizes: I) -> u64
where
    I: IntoIterator<Item = usize>,
{
    sizes.into_iter().map(comb2).sum()
}

/// Frequency of each distinct label
pub fn frequencies<L: Eq + Hash>(labels: &[L]) -> HashMap<&L, usize> {
    let mut counts = HashMap::new();
    for label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// `num / den`, or `0.0` when the denominator is zero
#[inline]
pub(crate) fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// Cross-tabulation of two index-aligned label sequences
///
/// Row `r` holds, for every column label `c`, the number of positions `i`
/// with `rows[i] == r` and `cols[i] == c`.
#[derive(Debug, Clone)]
pub struct Contingency<'a, R, C> {
    table: HashMap<&'a R, HashMap<&'a C, usize>>,
    total: usize,
}

impl<'a, R, C> Contingency<'a, R, C>
where
    R: Eq + Hash,
    C: Eq + Hash,
{
    /// Build the table. Callers check alignment first; extra trailing
    /// elements of the longer slice are ignored.
    pub fn build(rows: &'a [R], cols: &'a [C]) -> Self {
        let mut table: HashMap<&R, HashMap<&C, usize>> = HashMap::new();
        for (r, c) in rows.iter().zip(cols) {
            *table.entry(r).or_default().entry(c).or_insert(0) += 1;
        }
        Self {
            table,
            total: rows.len().min(cols.len()),
        }
    }

    /// Number of positions tabulated
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct row labels
    pub fn row_count(&self) -> usize {
        self.table.len()
    }

    /// Column distribution of a single row label
    pub fn row(&self, label: &R) -> Option<&HashMap<&'a C, usize>> {
        self.table.get(label)
    }

    /// Iterate over `(row label, column distribution)` in unspecified order
    pub fn rows(&self) -> impl Iterator<Item = (&'a R, &HashMap<&'a C, usize>)> + '_ {
        self.table.iter().map(|(r, dist)| (*r, dist))
    }
}

/// Size of a row, i.e. the sum of its column counts
pub(crate) fn row_size<C>(dist: &HashMap<C, usize>) -> usize {
    dist.values().sum()
}
