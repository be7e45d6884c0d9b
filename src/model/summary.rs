//! Per-pair consistency and average weight across a subject stack.

use ndarray::{Array2, Array3, Axis};
use serde::{Deserialize, Serialize};

/// Group-level summary of an `(n, n, s)` adjacency stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectivitySummary {
    /// Number of subjects with a nonzero weight at each pair.
    pub consistency: Array2<u32>,
    /// Mean of the nonzero weights at each pair; 0 where no subject has the edge.
    pub mean_weight: Array2<f64>,
}

impl ConnectivitySummary {
    pub fn from_stack(adj: &Array3<f64>) -> Self {
        let (rows, cols, _) = adj.dim();
        let mut consistency = Array2::<u32>::zeros((rows, cols));
        let mut mean_weight = Array2::<f64>::zeros((rows, cols));

        for subject in adj.axis_iter(Axis(2)) {
            for ((idx, &w), c) in subject.indexed_iter().zip(consistency.iter_mut()) {
                if w > 0.0 {
                    *c += 1;
                    mean_weight[idx] += w;
                }
            }
        }

        mean_weight.zip_mut_with(&consistency, |w, &c| {
            if c == 0 {
                *w = 0.0;
            } else {
                *w /= c as f64;
            }
        });

        Self { consistency, mean_weight }
    }

    pub fn consistency_at(&self, i: usize, j: usize) -> u32 {
        self.consistency[[i, j]]
    }

    pub fn weight_at(&self, i: usize, j: usize) -> f64 {
        self.mean_weight[[i, j]]
    }
}
