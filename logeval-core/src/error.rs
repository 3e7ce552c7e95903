//! Core error types (deterministic only)

use thiserror::Error;

/// Evaluation errors
///
/// The evaluators never touch the filesystem, so the only way a comparison
/// can fail is a malformed pair of inputs. Degenerate inputs (no lines, no
/// same-cluster pairs) are not errors: the affected metric is `0.0`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Ground truth and prediction do not describe the same lines
    #[error("length mismatch: truth has {truth} labels, pred has {pred}")]
    LengthMismatch {
        /// Number of ground-truth labels
        truth: usize,
        /// Number of predicted labels
        pred: usize,
    },
}

/// Result type for evaluation operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Check that two label sequences are index-aligned
pub(crate) fn ensure_aligned<A, B>(truth: &[A], pred: &[B]) -> Result<()> {
    if truth.len() != pred.len() {
        return Err(EvalError::LengthMismatch {
            truth: truth.len(),
            pred: pred.len(),
        });
    }
    Ok(())
}
