//! Error types for stepwise optimization.
//!
//! Optimization is a fallible operation: reaching the iteration cap without
//! converging is reported as an error carrying the final (non-optimal) point,
//! never as a sentinel return value.

use thiserror::Error;

/// Errors that can occur during a stepwise optimization run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepwiseError {
    /// The iteration cap was reached without the zero offset being selected.
    /// `x` is the last point adopted by the descent, included for diagnosis;
    /// it is not a local optimum.
    #[error("maxiter ({max_iter}) reached without convergence (x = {x:?})")]
    NonConvergence { x: Vec<f64>, max_iter: usize },

    /// Initial point and step vector have lengths that cannot be reconciled
    /// by scalar broadcasting.
    #[error(
        "dimension mismatch: initial point has length {x_len}, step vector has length {dx_len}, \
         and neither is a broadcastable scalar"
    )]
    DimensionMismatch { x_len: usize, dx_len: usize },

    /// No candidate produced a value strictly below positive infinity, so no
    /// descent direction (including staying put) could be ranked.
    #[error("objective produced no finite value at any candidate around x = {x:?}")]
    UndefinedObjective { x: Vec<f64> },

    /// The neighbor lattice `(2k+1)^d` does not fit in memory/usize.
    #[error("neighbor lattice (2*{search_range}+1)^{dim} is too large to materialize")]
    LatticeTooLarge { dim: usize, search_range: usize },

    /// Invalid arguments.
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type alias for stepwise operations.
pub type Result<T> = std::result::Result<T, StepwiseError>;
