//! Binary undirected group network.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Dense binary adjacency matrix. Symmetric with zero diagonal when built
/// through [`BinaryNetwork::from_upper_pairs`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryNetwork {
    adjacency: Array2<u8>,
}

impl BinaryNetwork {
    /// Empty network on `n` nodes.
    pub fn empty(n: usize) -> Self {
        Self { adjacency: Array2::zeros((n, n)) }
    }

    /// Symmetric network from strict-upper-triangle pairs `(i, j)`, `i < j`.
    /// Each pair sets both `(i, j)` and `(j, i)`.
    pub fn from_upper_pairs<I>(n: usize, pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut network = Self::empty(n);
        for (i, j) in pairs {
            debug_assert!(i < j, "pair ({i}, {j}) is not in the strict upper triangle");
            network.adjacency[[i, j]] = 1;
            network.adjacency[[j, i]] = 1;
        }
        network
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.nrows()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Sum of all matrix entries (twice the edge count for a symmetric network).
    pub fn total(&self) -> usize {
        self.adjacency.iter().map(|&v| v as usize).sum()
    }

    /// Fraction of possible undirected edges present.
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n < 2 {
            return 0.0;
        }
        self.edge_count() as f64 / (n * (n - 1) / 2) as f64
    }

    pub fn contains(&self, i: usize, j: usize) -> bool {
        self.adjacency[[i, j]] != 0
    }

    /// Undirected edges as `(i, j)` with `i < j`, row-major.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .indexed_iter()
            .filter(|&((i, j), &v)| i < j && v != 0)
            .map(|(idx, _)| idx)
    }

    /// Number of edges incident to `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.adjacency.row(node).iter().filter(|&&v| v != 0).count()
    }

    pub fn is_symmetric(&self) -> bool {
        self.adjacency == self.adjacency.t()
    }

    pub fn has_zero_diagonal(&self) -> bool {
        self.adjacency.diag().iter().all(|&v| v == 0)
    }

    pub fn is_binary(&self) -> bool {
        self.adjacency.iter().all(|&v| v <= 1)
    }

    pub fn as_array(&self) -> &Array2<u8> {
        &self.adjacency
    }

    pub fn into_array(self) -> Array2<u8> {
        self.adjacency
    }

    /// Same adjacency as `f64`, for numeric pipelines downstream.
    pub fn to_f64(&self) -> Array2<f64> {
        self.adjacency.mapv(f64::from)
    }
}
