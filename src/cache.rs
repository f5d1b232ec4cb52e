//! Memoization of objective evaluations keyed by exact point coordinates.
//!
//! The cache is owned by the caller and passed to the optimizer by mutable
//! reference; it grows monotonically (one entry per distinct point ever
//! evaluated) and is never cleared or evicted by the optimizer. Reusing one
//! cache across several runs warm-starts related fits.
//!
//! Keys compare coordinate-wise with no tolerance. Two points produced by
//! different arithmetic that happen to be "numerically equal in practice"
//! but differ in the last bit are distinct keys; the cost is a redundant
//! objective call, never a wrong value. A tolerance would risk merging two
//! genuinely distinct sampled positions, so none is used.

use std::cmp::Ordering;
use std::collections::BTreeMap;

// ──────────────────────────────────────────────────────────────────────────────
// PointKey: exact lexicographic ordering over coordinates
// ──────────────────────────────────────────────────────────────────────────────

/// A parameter vector usable as an ordered map key.
///
/// Ordering is lexicographic over coordinates using `f64::total_cmp`, then by
/// length. `total_cmp` yields a true total order (NaN coordinates sort
/// deterministically) and is bitwise-exact: `-0.0` and `+0.0` are distinct
/// keys, costing at most a spurious cache miss.
#[derive(Debug, Clone)]
pub struct PointKey(Box<[f64]>);

impl PointKey {
    pub fn new(x: &[f64]) -> Self {
        Self(x.into())
    }

    /// The point's coordinates.
    pub fn coords(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for PointKey {
    fn from(x: Vec<f64>) -> Self {
        Self(x.into_boxed_slice())
    }
}

impl PartialEq for PointKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PointKey {}

impl PartialOrd for PointKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PointKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            match a.total_cmp(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// EvaluationCache
// ──────────────────────────────────────────────────────────────────────────────

/// Mapping from exact parameter vectors to previously computed objective
/// values.
///
/// May be constructed empty or pre-populated before a run; pre-populated
/// entries take precedence over the live objective. Note the sign convention:
/// during a maximize run the optimizer stores *negated* values, so a cache
/// must not be shared between minimize and maximize runs of the same logical
/// objective.
#[derive(Debug, Clone, Default)]
pub struct EvaluationCache {
    entries: BTreeMap<PointKey, f64>,
}

impl EvaluationCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the value stored for exactly `x`, if any.
    pub fn get(&self, x: &[f64]) -> Option<f64> {
        self.entries.get(&PointKey::new(x)).copied()
    }

    /// Store `value` under the exact coordinates of `x`, returning the
    /// previous value if one was present.
    pub fn insert(&mut self, x: &[f64], value: f64) -> Option<f64> {
        self.entries.insert(PointKey::new(x), value)
    }

    /// Whether a value is stored for exactly `x`.
    pub fn contains(&self, x: &[f64]) -> bool {
        self.entries.contains_key(&PointKey::new(x))
    }

    /// Number of cached evaluations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over cached `(point, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&[f64], f64)> {
        self.entries.iter().map(|(k, &v)| (k.coords(), v))
    }
}
