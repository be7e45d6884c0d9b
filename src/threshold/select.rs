//! Ranking of candidate pairs and the tie-breaking policy.

use serde::{Deserialize, Serialize};

/// Node pair `(i, j)` in the strict upper triangle, `i < j`.
pub type Pair = (usize, usize);

/// Ordering among pairs with equal ranking keys.
///
/// Candidates are discovered in row-major order over the upper triangle and
/// ranked with a stable sort, so the policy only decides which end of that
/// discovery order wins a tie.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Earlier pairs (lower row, then lower column) win ties.
    #[default]
    FirstDiscovered,
    /// Later pairs win ties. Equivalent to reversing an ascending stable argsort.
    LastDiscovered,
}

/// The `k` highest-keyed pairs, best first. Returns every pair when `k`
/// exceeds `pairs.len()`.
pub(crate) fn top_k<F>(pairs: &[Pair], k: usize, tie_break: TieBreak, key: F) -> Vec<Pair>
where
    F: Fn(Pair) -> f64,
{
    let mut ranked: Vec<(f64, Pair)> = pairs.iter().map(|&p| (key(p), p)).collect();
    match tie_break {
        TieBreak::FirstDiscovered => ranked.sort_by(|a, b| b.0.total_cmp(&a.0)),
        TieBreak::LastDiscovered => {
            ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
            ranked.reverse();
        }
    }
    ranked.into_iter().take(k).map(|(_, p)| p).collect()
}
