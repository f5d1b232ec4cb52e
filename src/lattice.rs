//! Neighbor lattice: the fixed set of candidate offset vectors explored each
//! iteration.
//!
//! For dimension `d` and search range `k`, the lattice is the Cartesian
//! product of `{-k, …, -1, 0, 1, …, k}` across all dimensions, scaled by the
//! per-dimension step size: `(2k+1)^d` offset vectors in total. It depends
//! only on the step vector and `k`, so it is built exactly once per run and
//! reused across all iterations.
//!
//! Enumeration is row-major with the last dimension varying fastest. The
//! order is significant: candidate selection keeps the first minimum found in
//! a single left-to-right scan, so ties are broken toward earlier offsets.

use crate::error::{Result, StepwiseError};

/// Precomputed offset vectors for one optimization run.
#[derive(Debug, Clone)]
pub struct NeighborLattice {
    offsets: Vec<Vec<f64>>,
    dim: usize,
    search_range: usize,
}

impl NeighborLattice {
    /// Build the `(2k+1)^d` offset vectors for step vector `dx` and search
    /// range `k`, in row-major order.
    ///
    /// Offset `i`, coordinate `j` is `dx[j] * s` where
    /// `s = (i % (range_j * (2k+1))) / range_j - k` and
    /// `range_j = (2k+1)^(d-j-1)`.
    ///
    /// # Errors
    /// Returns [`StepwiseError::LatticeTooLarge`] when `(2k+1)^d` overflows,
    /// and [`StepwiseError::InvalidArgs`] for an empty step vector.
    pub fn build(dx: &[f64], search_range: usize) -> Result<Self> {
        let dim = dx.len();
        if dim == 0 {
            return Err(StepwiseError::InvalidArgs(
                "step vector must be non-empty".into(),
            ));
        }

        let span = 2 * search_range + 1;
        let too_large = || StepwiseError::LatticeTooLarge { dim, search_range };
        let dim_u32 = u32::try_from(dim).map_err(|_| too_large())?;
        let size = span.checked_pow(dim_u32).ok_or_else(too_large)?;

        // ranges[j] = span^(d-j-1); ranges[d-1] == 1.
        let mut ranges = vec![1usize; dim];
        for j in (0..dim - 1).rev() {
            ranges[j] = ranges[j + 1].checked_mul(span).ok_or_else(too_large)?;
        }

        let k = search_range as i64;
        let mut offsets = Vec::with_capacity(size);
        for i in 0..size {
            let offset: Vec<f64> = (0..dim)
                .map(|j| {
                    let level = (i % (ranges[j] * span) / ranges[j]) as i64 - k;
                    dx[j] * level as f64
                })
                .collect();
            offsets.push(offset);
        }

        Ok(Self {
            offsets,
            dim,
            search_range,
        })
    }

    /// Number of offset vectors, `(2k+1)^d`.
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Dimensionality `d`.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Search range `k`.
    pub fn search_range(&self) -> usize {
        self.search_range
    }

    /// The `i`-th offset vector in enumeration order.
    pub fn offset(&self, i: usize) -> &[f64] {
        &self.offsets[i]
    }

    /// Whether the `i`-th offset is the all-zero displacement. Tested on the
    /// actual offset values, so a dimension with `dx[j] == 0.0` contributes
    /// zero regardless of its step level.
    pub fn is_zero(&self, i: usize) -> bool {
        self.offsets[i].iter().all(|&v| v == 0.0)
    }

    /// Iterate over offset vectors in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.offsets.iter().map(Vec::as_slice)
    }
}
