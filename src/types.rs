//! Core type definitions: optimizer options and result structures.

use std::fmt;

// ──────────────────────────────────────────────────────────────────────────────
// Options
// ──────────────────────────────────────────────────────────────────────────────

/// Configuration options for the stepwise optimizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepwiseOptions {
    /// Number of discrete steps explored per dimension per iteration, in each
    /// direction. `search_range = 1` evaluates offsets in `{-1, 0, 1}` steps;
    /// larger values make escaping shallow local optima more likely at the
    /// cost of `(2k+1)^d` evaluations per iteration. Default: 1.
    pub search_range: usize,

    /// Maximum number of descent iterations before the run fails with
    /// [`StepwiseError::NonConvergence`](crate::StepwiseError::NonConvergence).
    /// Default: 10000.
    pub max_iter: usize,

    /// Enable parallel evaluation of uncached candidates within one iteration
    /// using rayon. Cache writes and candidate selection remain sequential in
    /// enumeration order, so results are identical to the serial path.
    /// Requires the objective to be reentrant. Default: false.
    pub parallel: bool,

    /// Minimum number of uncached candidates required to use parallel
    /// evaluation. Below this threshold the serial path is used even when
    /// `parallel` is `true`, avoiding rayon thread-pool overhead for small
    /// batches (1-D problems with `search_range = 1` produce at most 3
    /// candidates per iteration). Default: 4.
    pub min_parallel_evals: usize,
}

impl Default for StepwiseOptions {
    fn default() -> Self {
        Self {
            search_range: 1,
            max_iter: 10_000,
            parallel: false,
            min_parallel_evals: 4,
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Result
// ──────────────────────────────────────────────────────────────────────────────

/// Result of a converged stepwise optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct StepwiseResult {
    /// The converged point: no lattice neighbour within `search_range` steps
    /// has a strictly smaller objective value.
    pub x: Vec<f64>,

    /// Objective value at `x`. For a maximize run this is in the caller's
    /// sign convention (not the internally negated value).
    pub fun: f64,

    /// Number of descent iterations performed, including the final one that
    /// detected convergence.
    pub nit: usize,

    /// Number of objective function calls. Cache hits do not count.
    pub nfev: usize,

    /// Number of candidate lookups answered from the evaluation cache.
    pub cache_hits: usize,
}

impl fmt::Display for StepwiseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "StepwiseResult {{")?;
        writeln!(f, "  fun: {:.15e}", self.fun)?;
        write!(f, "  x: [")?;
        for (i, xi) in self.x.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.15e}", xi)?;
        }
        writeln!(f, "]")?;
        writeln!(f, "  nit: {}", self.nit)?;
        writeln!(f, "  nfev: {}", self.nfev)?;
        writeln!(f, "  cache_hits: {}", self.cache_hits)?;
        write!(f, "}}")
    }
}
