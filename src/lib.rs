//! # stepwise-opt: discrete nearest-neighbour stepwise optimization
//!
//! A small derivative-free optimizer for objectives defined on a quantized
//! grid: starting from an initial point, each iteration evaluates the
//! objective at every lattice neighbour within `search_range` discrete steps
//! per dimension, moves to the best one, and stops once no neighbour improves
//! on the current point. Every evaluation is memoized in a caller-owned
//! [`EvaluationCache`] keyed by the exact point coordinates, so revisited
//! grid points never trigger a second objective call, including across
//! separate optimizer runs that share a cache.
//!
//! ## Overview
//!
//! - [`StepwiseMinimizer`]: nearest-neighbour discrete descent.
//! - [`StepwiseMaximizer`]: negates the objective and delegates to the
//!   minimizer.
//! - [`EvaluationCache`]: exact-keyed memoization table, owned by the
//!   caller and reusable across runs (e.g. to warm-start related fits).
//! - [`NeighborLattice`]: the fixed `(2k+1)^d` offset set explored each
//!   iteration.
//!
//! The optimizer is synchronous and runs to completion on the calling
//! thread. With [`StepwiseOptions::parallel`] enabled, uncached candidate
//! evaluations within one iteration are dispatched through rayon; selection
//! stays sequential, so results are identical to the serial path.
//!
//! ## Example
//!
//! ```
//! use stepwise_opt::{EvaluationCache, StepwiseMinimizer};
//!
//! let mut cache = EvaluationCache::new();
//! let minimizer = StepwiseMinimizer::new(|x: &[f64]| (x[0] - 3.7).powi(2));
//! let result = minimizer.minimize(&[0.0], &[0.1], &mut cache).unwrap();
//! assert!((result.x[0] - 3.7).abs() < 0.1);
//! ```

pub mod cache;
pub mod error;
pub mod lattice;
pub mod stepwise;
pub mod trace;
pub mod types;

// Re-export main types
pub use cache::{EvaluationCache, PointKey};
pub use error::{Result, StepwiseError};
pub use lattice::NeighborLattice;
pub use stepwise::{StepwiseMaximizer, StepwiseMinimizer};
pub use trace::TraceWriter;
pub use types::{StepwiseOptions, StepwiseResult};
