//! # consensus-net — Distance-Dependent Consensus Networks
//!
//! Builds a single group-representative binary structural brain network
//! from per-subject weighted connectivity matrices, preserving the
//! empirical distribution of connection lengths separately within and
//! between hemispheres.
//!
//! ## Design Principles
//!
//! 1. **Pure function core**: thresholding reads immutable inputs and returns fresh outputs
//! 2. **Explicit groups**: intra- and inter-hemispheric pairs are a two-variant enum, not an index
//! 3. **Strict on degenerate input**: empty groups and distance-less inputs are errors, never NaNs
//! 4. **Deterministic ties**: equal-ranked pairs resolve by discovery order ([`TieBreak`])
//!
//! ## Quick Start
//!
//! ```rust
//! use consensus_net::threshold;
//! use ndarray::{Array2, Array3};
//!
//! # fn example() -> consensus_net::Result<()> {
//! let n = 4;
//! let mut adj = Array3::<f64>::zeros((n, n, 3));
//! let mut dist = Array2::<f64>::zeros((n, n));
//! for i in 0..n {
//!     for j in 0..n {
//!         if i != j {
//!             dist[[i, j]] = (i + j) as f64;
//!             for s in 0..3 {
//!                 adj[[i, j, s]] = 1.0 + s as f64;
//!             }
//!         }
//!     }
//! }
//!
//! let (g, gc) = threshold(&adj, &dist, &[false, false, true, true], 2)?;
//! assert_eq!(g.edge_count(), gc.edge_count());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Outputs
//!
//! | Network | Selection | Distance-aware |
//! |---------|-----------|----------------|
//! | `G` | top consistency per distance bin, per hemisphere group | yes |
//! | `Gc` | top mean weight per hemisphere group, same edge count as `G` | no |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod threshold;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    BinaryNetwork, ConnectivitySummary, DistanceBins,
    Hemisphere, HemisphereGroup, HemisphereLabels,
};

// ============================================================================
// Re-exports: Thresholding
// ============================================================================

pub use threshold::{
    threshold, ConsensusNetworks, ConsensusThresholder, ThresholdConfig,
    ThresholdReport, GroupReport, BinReport, TieBreak, DEFAULT_BINS,
};

// ============================================================================
// Re-exports: Export
// ============================================================================

pub use export::{export_cypher_dump, to_json, write_edge_list};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Shape error: {0}")]
    ShapeError(String),

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
