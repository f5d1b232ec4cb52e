//! Cache correctness: at most one objective call per distinct exact point,
//! across all runs sharing one cache; cached entries take precedence over the
//! live objective.

use std::sync::atomic::{AtomicUsize, Ordering};

use stepwise_opt::{EvaluationCache, StepwiseMinimizer};

// ─────────────────────────────────────────────────────────────────────────────
// Counting objective
// ─────────────────────────────────────────────────────────────────────────────

struct EvalCounter {
    count: AtomicUsize,
}

impl EvalCounter {
    fn new() -> Self {
        Self {
            count: AtomicUsize::new(0),
        }
    }
    fn get(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }
}

#[test]
fn test_each_distinct_point_evaluated_at_most_once() {
    let counter = EvalCounter::new();
    let objective = |x: &[f64]| {
        counter.count.fetch_add(1, Ordering::Relaxed);
        (x[0] - 0.5).powi(2) + (x[1] - 0.25).powi(2)
    };

    let minimizer = StepwiseMinimizer::new(objective);
    let mut cache = EvaluationCache::new();
    let result = minimizer
        .minimize(&[0.0, 0.0], &[0.25, 0.25], &mut cache)
        .unwrap();

    // Every objective call was a cache miss stored under a distinct point.
    assert_eq!(result.nfev, counter.get());
    assert_eq!(cache.len(), counter.get());
    // Overlapping neighborhoods between iterations produce hits.
    assert!(result.cache_hits > 0);
}

#[test]
fn test_second_run_from_same_start_is_fully_cached() {
    let counter = EvalCounter::new();
    let objective = |x: &[f64]| {
        counter.count.fetch_add(1, Ordering::Relaxed);
        (x[0] - 1.2).powi(2)
    };

    let minimizer = StepwiseMinimizer::new(objective);
    let mut cache = EvaluationCache::new();

    let first = minimizer.minimize(&[0.0], &[0.1], &mut cache).unwrap();
    let calls_after_first = counter.get();

    let second = minimizer.minimize(&[0.0], &[0.1], &mut cache).unwrap();
    assert_eq!(second.x, first.x);
    assert_eq!(second.fun, first.fun);
    assert_eq!(second.nit, first.nit);
    // Identical trajectory, every lookup a hit: zero new objective calls.
    assert_eq!(second.nfev, 0);
    assert_eq!(counter.get(), calls_after_first);
}

#[test]
fn test_warm_start_from_nearby_point_reuses_entries() {
    let counter = EvalCounter::new();
    let objective = |x: &[f64]| {
        counter.count.fetch_add(1, Ordering::Relaxed);
        (x[0] - 1.0).powi(2)
    };

    let minimizer = StepwiseMinimizer::new(objective);
    let mut cache = EvaluationCache::new();

    minimizer.minimize(&[0.0], &[0.25], &mut cache).unwrap();
    let calls_cold = counter.get();

    // Start one grid point away from the previous start: the trajectory is a
    // subset of already-seen points except for one new left neighbour.
    let warm = minimizer.minimize(&[0.25], &[0.25], &mut cache).unwrap();
    assert_eq!(warm.x, vec![1.0]);
    assert!(counter.get() - calls_cold <= 1, "warm start re-evaluated points");
}

#[test]
fn test_prepopulated_entries_take_precedence() {
    // The cache says [0.1] scores -100 even though the live objective
    // disagrees; the optimizer must trust the cache and never re-evaluate.
    let objective = |x: &[f64]| x[0] * x[0];
    let minimizer = StepwiseMinimizer::new(objective);

    let mut cache = EvaluationCache::new();
    cache.insert(&[0.1], -100.0);

    let result = minimizer.minimize(&[0.0], &[0.1], &mut cache).unwrap();
    assert_eq!(result.x, vec![0.1]);
    assert_eq!(result.fun, -100.0);
    assert_eq!(cache.get(&[0.1]), Some(-100.0));
}

#[test]
fn test_optimizer_never_removes_entries() {
    let minimizer = StepwiseMinimizer::new(|x: &[f64]| x[0] * x[0]);
    let mut cache = EvaluationCache::new();
    cache.insert(&[123.0], 42.0);

    minimizer.minimize(&[0.5], &[0.25], &mut cache).unwrap();
    // The unrelated pre-seeded entry survives untouched.
    assert_eq!(cache.get(&[123.0]), Some(42.0));
}
