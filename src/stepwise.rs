//! Discrete nearest-neighbour descent: parameter normalization, the
//! iteration loop, and the public minimizer/maximizer surface.
//!
//! Each iteration forms the candidate set `x + offset` for every offset in
//! the precomputed [`NeighborLattice`] (the zero offset, i.e. the current
//! point, included exactly once), resolves every candidate through the
//! caller-owned [`EvaluationCache`], and adopts the candidate with the
//! strictly smallest value. Ties break toward the first candidate in
//! enumeration order, because selection keeps the first minimum found in a
//! single left-to-right scan.
//! Selecting the zero offset means no neighbour improves on the current
//! point: the run has converged and the current point is returned unchanged.
//! Exhausting `max_iter` without convergence is an error, never a silently
//! non-optimal return.

use std::sync::Arc;

use rayon::prelude::*;

use crate::cache::EvaluationCache;
use crate::error::{Result, StepwiseError};
use crate::lattice::NeighborLattice;
use crate::trace::TraceWriter;
use crate::trace_write;
use crate::types::{StepwiseOptions, StepwiseResult};

// ──────────────────────────────────────────────────────────────────────────────
// Parameter normalization
// ──────────────────────────────────────────────────────────────────────────────

/// Reconcile the dimensionality of the initial point and the step vector.
///
/// A 1-element vector broadcasts against the other vector's length; otherwise
/// both must already agree. A non-broadcastable mismatch is a reported
/// configuration error rather than undefined downstream geometry.
fn broadcast(x0: &[f64], dx: &[f64]) -> Result<(Vec<f64>, Vec<f64>)> {
    if x0.is_empty() || dx.is_empty() {
        return Err(StepwiseError::InvalidArgs(
            "initial point and step vector must be non-empty".into(),
        ));
    }
    if x0.len() == 1 && dx.len() > 1 {
        Ok((vec![x0[0]; dx.len()], dx.to_vec()))
    } else if dx.len() == 1 && x0.len() > 1 {
        Ok((x0.to_vec(), vec![dx[0]; x0.len()]))
    } else if x0.len() == dx.len() {
        Ok((x0.to_vec(), dx.to_vec()))
    } else {
        Err(StepwiseError::DimensionMismatch {
            x_len: x0.len(),
            dx_len: dx.len(),
        })
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Descent engine
// ──────────────────────────────────────────────────────────────────────────────

/// Core descent loop shared by the minimizer and the maximizer.
#[cfg_attr(not(feature = "trace"), allow(unused_variables))]
fn descend<F>(
    func: &F,
    x0: &[f64],
    dx: &[f64],
    cache: &mut EvaluationCache,
    options: &StepwiseOptions,
    tracer: Option<&TraceWriter>,
) -> Result<StepwiseResult>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    let (mut x, dx) = broadcast(x0, dx)?;
    let lattice = NeighborLattice::build(&dx, options.search_range)?;
    trace_write!(
        tracer,
        "TRACE START dim={} search_range={} lattice={}",
        lattice.dim(),
        options.search_range,
        lattice.len()
    );

    let mut nfev = 0usize;
    let mut cache_hits = 0usize;

    for t in 0..options.max_iter {
        let mut candidates: Vec<Vec<f64>> = lattice
            .iter()
            .map(|offset| x.iter().zip(offset).map(|(&xi, &oi)| xi + oi).collect())
            .collect();

        // Resolve every candidate through the cache; collect misses.
        let mut values = vec![0.0_f64; candidates.len()];
        let mut pending: Vec<usize> = Vec::new();
        for (i, candidate) in candidates.iter().enumerate() {
            match cache.get(candidate) {
                Some(v) => {
                    values[i] = v;
                    cache_hits += 1;
                }
                None => pending.push(i),
            }
        }

        if options.parallel && pending.len() >= options.min_parallel_evals {
            // Evaluate misses in parallel; apply results sequentially in
            // enumeration order so selection stays deterministic.
            let computed: Vec<f64> = pending.par_iter().map(|&i| func(&candidates[i])).collect();
            for (&i, &v) in pending.iter().zip(computed.iter()) {
                cache.insert(&candidates[i], v);
                values[i] = v;
            }
        } else {
            for &i in &pending {
                let v = func(&candidates[i]);
                cache.insert(&candidates[i], v);
                values[i] = v;
            }
        }
        nfev += pending.len();

        // Single left-to-right scan; the first strict minimum wins ties.
        let mut best_idx = None;
        let mut best_val = f64::INFINITY;
        for (i, &v) in values.iter().enumerate() {
            if v < best_val {
                best_idx = Some(i);
                best_val = v;
            }
        }
        let best_idx = match best_idx {
            Some(i) => i,
            None => return Err(StepwiseError::UndefinedObjective { x }),
        };

        trace_write!(
            tracer,
            "TRACE ITER t={} best={} f={:.15e} nfev={} hits={}",
            t + 1,
            best_idx,
            best_val,
            nfev,
            cache_hits
        );

        if lattice.is_zero(best_idx) {
            trace_write!(
                tracer,
                "TRACE CONVERGED t={} f={:.15e} nfev={}",
                t + 1,
                best_val,
                nfev
            );
            return Ok(StepwiseResult {
                x,
                fun: best_val,
                nit: t + 1,
                nfev,
                cache_hits,
            });
        }
        x = candidates.swap_remove(best_idx);
    }

    Err(StepwiseError::NonConvergence {
        x,
        max_iter: options.max_iter,
    })
}

// ──────────────────────────────────────────────────────────────────────────────
// StepwiseMinimizer
// ──────────────────────────────────────────────────────────────────────────────

/// Nearest-neighbour discrete descent minimizer.
///
/// The objective is any `Fn(&[f64]) -> f64 + Sync`; fixed extra context goes
/// into the closure's captures. It is assumed pure: deterministic for a given
/// input (required for cache correctness) and free of side effects the
/// optimizer would need to guard against.
///
/// ```
/// use stepwise_opt::{EvaluationCache, StepwiseMinimizer};
///
/// let offset = 1.0; // fixed extra argument, captured by the closure
/// let minimizer = StepwiseMinimizer::new(move |x: &[f64]| (x[0] - offset).powi(2));
/// let mut cache = EvaluationCache::new();
/// let result = minimizer.minimize(&[0.0], &[0.25], &mut cache).unwrap();
/// assert_eq!(result.x, vec![1.0]);
/// ```
pub struct StepwiseMinimizer<F> {
    func: F,
    options: StepwiseOptions,
    tracer: Option<Arc<TraceWriter>>,
}

impl<F> StepwiseMinimizer<F>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    /// Create a minimizer with default [`StepwiseOptions`].
    pub fn new(func: F) -> Self {
        Self::with_options(func, StepwiseOptions::default())
    }

    /// Create a minimizer with explicit options.
    pub fn with_options(func: F, options: StepwiseOptions) -> Self {
        Self {
            func,
            options,
            tracer: None,
        }
    }

    /// Attach a trace writer. Has no effect unless the `trace` feature is
    /// enabled.
    pub fn with_tracer(mut self, tracer: Arc<TraceWriter>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Run the descent from `x0` with per-dimension steps `dx`, memoizing
    /// evaluations in `cache`.
    ///
    /// `x0` and `dx` must have equal lengths, or one of them must be a
    /// 1-element vector that is broadcast to the other's length. The cache is
    /// caller-owned: it may be empty, pre-populated (cached entries take
    /// precedence over the live objective), or shared across runs; the
    /// optimizer only adds entries, never removes them.
    ///
    /// On success the returned point is a local minimum of the lattice: no
    /// neighbour within `search_range` steps has a strictly smaller value.
    ///
    /// # Errors
    /// [`StepwiseError::NonConvergence`] when `max_iter` iterations complete
    /// without the zero offset being selected, plus the configuration errors
    /// described on [`StepwiseError`].
    pub fn minimize(
        &self,
        x0: &[f64],
        dx: &[f64],
        cache: &mut EvaluationCache,
    ) -> Result<StepwiseResult> {
        descend(
            &self.func,
            x0,
            dx,
            cache,
            &self.options,
            self.tracer.as_deref(),
        )
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// StepwiseMaximizer
// ──────────────────────────────────────────────────────────────────────────────

/// Nearest-neighbour discrete descent maximizer.
///
/// Thin adapter that negates the objective and delegates to the minimizer
/// engine, including cache semantics, tie-breaking, and failure behavior.
/// The cache therefore stores *negated* values: a cache used for a maximize
/// run must not be reused for a minimize run of the same logical objective,
/// and vice versa. [`StepwiseResult::fun`] is reported re-negated, in the
/// caller's sign convention.
pub struct StepwiseMaximizer<F> {
    func: F,
    options: StepwiseOptions,
    tracer: Option<Arc<TraceWriter>>,
}

impl<F> StepwiseMaximizer<F>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    /// Create a maximizer with default [`StepwiseOptions`].
    pub fn new(func: F) -> Self {
        Self::with_options(func, StepwiseOptions::default())
    }

    /// Create a maximizer with explicit options.
    pub fn with_options(func: F, options: StepwiseOptions) -> Self {
        Self {
            func,
            options,
            tracer: None,
        }
    }

    /// Attach a trace writer. Has no effect unless the `trace` feature is
    /// enabled.
    pub fn with_tracer(mut self, tracer: Arc<TraceWriter>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    /// Run the ascent from `x0` with per-dimension steps `dx`.
    ///
    /// Identical contract to [`StepwiseMinimizer::minimize`] with the
    /// objective negated; failures propagate unchanged.
    pub fn maximize(
        &self,
        x0: &[f64],
        dx: &[f64],
        cache: &mut EvaluationCache,
    ) -> Result<StepwiseResult> {
        let func = &self.func;
        let negated = move |x: &[f64]| -func(x);
        let mut result = descend(&negated, x0, dx, cache, &self.options, self.tracer.as_deref())?;
        result.fun = -result.fun;
        Ok(result)
    }
}
