//! # Distance Bins
//!
//! Equal-width, half-open intervals over the observed nonzero distance range:
//!
//! ```text
//! edges:  b0 = min(d > 0)   b1   ...   b_nbins = max(d > 0) + 1
//! bins:   [b0, b1)  [b1, b2)  ...  [b_{nbins-1}, b_nbins)
//! ```
//!
//! The top edge is widened by one distance unit so the maximum observed
//! distance falls inside the last bin instead of on its open boundary.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Amount added to the top edge so `max(dist)` lands inside the last bin.
pub const TOP_EDGE_WIDENING: f64 = 1.0;

/// Bin edges partitioning the nonzero distance range.
///
/// Serializes as the plain edge array. Deserializing checks the same shape
/// [`DistanceBins::from_distances`] guarantees: at least two finite edges,
/// non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct DistanceBins {
    edges: Vec<f64>,
}

impl TryFrom<Vec<f64>> for DistanceBins {
    type Error = Error;

    fn try_from(edges: Vec<f64>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(Error::InvalidValue(format!(
                "distance bins need at least 2 edges, got {}",
                edges.len()
            )));
        }
        if edges.iter().any(|e| !e.is_finite()) || edges.windows(2).any(|w| w[0] > w[1]) {
            return Err(Error::InvalidValue(
                "distance bin edges must be finite and non-decreasing".into(),
            ));
        }
        Ok(Self { edges })
    }
}

impl From<DistanceBins> for Vec<f64> {
    fn from(bins: DistanceBins) -> Self {
        bins.edges
    }
}

impl DistanceBins {
    /// Build `nbins` equal-width bins spanning the nonzero entries of `dist`.
    ///
    /// Fails with [`Error::InvalidConfig`] when `nbins` is zero and with
    /// [`Error::DegenerateInput`] when `dist` has no nonzero entry.
    pub fn from_distances(dist: &Array2<f64>, nbins: usize) -> Result<Self> {
        if nbins == 0 {
            return Err(Error::InvalidConfig("bin count must be positive".into()));
        }

        let range = dist
            .iter()
            .copied()
            .filter(|&d| d != 0.0)
            .fold(None, |acc: Option<(f64, f64)>, d| match acc {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            });

        let Some((lo, hi)) = range else {
            return Err(Error::DegenerateInput(
                "distance matrix has no nonzero entries".into(),
            ));
        };

        Ok(Self::spanning(lo, hi, nbins))
    }

    /// `nbins` equal-width bins over `[lo, hi]`, top edge widened.
    pub(crate) fn spanning(lo: f64, hi: f64, nbins: usize) -> Self {
        let step = (hi - lo) / nbins as f64;
        let mut edges: Vec<f64> = (0..=nbins).map(|i| lo + i as f64 * step).collect();
        // Pin the top edge to the exact maximum before widening
        edges[nbins] = hi + TOP_EDGE_WIDENING;
        Self { edges }
    }

    /// Number of bins (one less than the number of edges).
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Half-open bounds `[lower, upper)` of bin `index`.
    pub fn bounds(&self, index: usize) -> (f64, f64) {
        (self.edges[index], self.edges[index + 1])
    }

    /// Index of the bin containing `distance`, if any.
    ///
    /// Zero-width bins (repeated edges) never match; the value lands in the
    /// last bin whose lower edge does not exceed it.
    pub fn bin_of(&self, distance: f64) -> Option<usize> {
        let idx = self.edges.partition_point(|&e| e <= distance);
        if idx == 0 || idx >= self.edges.len() {
            None
        } else {
            Some(idx - 1)
        }
    }
}
