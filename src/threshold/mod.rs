//! # Consensus Thresholder
//!
//! Builds a group-representative binary network from a stack of subject
//! connectivity matrices while preserving the pooled distribution of
//! connection lengths, separately within and between hemispheres.
//!
//! ## Pipeline
//!
//! ```text
//! adj (n×n×s) ─┬─► ConnectivitySummary (C, W)
//! dist (n×n) ──┼─► DistanceBins
//! labels (n) ──┘
//!        │
//!        ├─► select_group(Intra) ─┐
//!        └─► select_group(Inter) ─┴─► union + symmetrize ─► (G, Gc)
//! ```
//!
//! The two groups read only shared immutable inputs. With the `parallel`
//! feature enabled and [`ThresholdConfig::parallel`] set, they run on the
//! rayon pool; aggregation always waits for both.

mod group;
mod report;
mod select;

use ndarray::{Array2, Array3};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::model::{
    BinaryNetwork, ConnectivitySummary, DistanceBins, HemisphereGroup, HemisphereLabels,
};
use crate::{Error, Result};
use group::{GroupInputs, GroupSelection, select_group};

pub use report::{BinReport, GroupReport, ThresholdReport};
pub use select::{Pair, TieBreak};

// ============================================================================
// Configuration
// ============================================================================

/// Bin count used when none is given.
pub const DEFAULT_BINS: usize = 41;

/// Thresholding parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThresholdConfig {
    /// Number of equal-width distance bins.
    pub nbins: usize,
    /// Ordering among candidates with equal consistency or weight.
    pub tie_break: TieBreak,
    /// Evaluate the two hemisphere groups concurrently. Needs the
    /// `parallel` feature; ignored otherwise.
    pub parallel: bool,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            nbins: DEFAULT_BINS,
            tie_break: TieBreak::default(),
            parallel: false,
        }
    }
}

impl ThresholdConfig {
    pub fn new(nbins: usize) -> Self {
        Self { nbins, ..Self::default() }
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Parse a JSON object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidConfig(format!("malformed threshold config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.nbins == 0 {
            return Err(Error::InvalidConfig("bin count must be positive".into()));
        }
        Ok(())
    }
}

// ============================================================================
// Result
// ============================================================================

/// Both group networks plus the selection diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusNetworks {
    /// Distance-dependent consensus network (`G`).
    pub distance: BinaryNetwork,
    /// Consistency-thresholded network of matched density (`Gc`).
    pub consistency: BinaryNetwork,
    pub report: ThresholdReport,
}

// ============================================================================
// Thresholder
// ============================================================================

/// Reusable thresholder holding a validated configuration.
#[derive(Debug, Clone)]
pub struct ConsensusThresholder {
    config: ThresholdConfig,
}

impl ConsensusThresholder {
    pub fn new(config: ThresholdConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ThresholdConfig {
        &self.config
    }

    /// Threshold a subject stack `adj` of shape `(n, n, s)` against the
    /// node-pair distances `dist` of shape `(n, n)`.
    pub fn run(
        &self,
        adj: &Array3<f64>,
        dist: &Array2<f64>,
        labels: &HemisphereLabels,
    ) -> Result<ConsensusNetworks> {
        let (n, subjects) = validate_inputs(adj, dist, labels)?;

        let bins = DistanceBins::from_distances(dist, self.config.nbins)?;
        let summary = ConnectivitySummary::from_stack(adj);
        debug!(nodes = n, subjects, nbins = bins.len(), "thresholding subject stack");

        let inputs = GroupInputs {
            adj,
            dist,
            labels,
            bins: &bins,
            summary: &summary,
            tie_break: self.config.tie_break,
        };
        let selections = self.select_groups(&inputs)?;

        let distance = BinaryNetwork::from_upper_pairs(
            n,
            selections.iter().flat_map(|s| s.distance.iter().copied()),
        );
        let consistency = BinaryNetwork::from_upper_pairs(
            n,
            selections.iter().flat_map(|s| s.consistency.iter().copied()),
        );

        let report = ThresholdReport {
            nodes: n,
            subjects,
            bin_edges: bins.edges().to_vec(),
            groups: selections.into_iter().map(|s| s.report).collect(),
        };

        info!(
            nodes = n,
            subjects,
            edges = distance.edge_count(),
            density = distance.density(),
            "consensus network built"
        );

        Ok(ConsensusNetworks { distance, consistency, report })
    }

    #[cfg(feature = "parallel")]
    fn select_groups(&self, inputs: &GroupInputs<'_>) -> Result<Vec<GroupSelection>> {
        if !self.config.parallel {
            return select_sequential(inputs);
        }
        let [first, second] = HemisphereGroup::ALL;
        let (a, b) = rayon::join(|| select_group(inputs, first), || select_group(inputs, second));
        Ok(vec![a?, b?])
    }

    #[cfg(not(feature = "parallel"))]
    fn select_groups(&self, inputs: &GroupInputs<'_>) -> Result<Vec<GroupSelection>> {
        if self.config.parallel {
            debug!("parallel evaluation requested without the `parallel` feature; running sequentially");
        }
        select_sequential(inputs)
    }
}

fn select_sequential(inputs: &GroupInputs<'_>) -> Result<Vec<GroupSelection>> {
    HemisphereGroup::ALL
        .into_iter()
        .map(|group| select_group(inputs, group))
        .collect()
}

/// Check dimensions and values; returns `(nodes, subjects)`.
fn validate_inputs(
    adj: &Array3<f64>,
    dist: &Array2<f64>,
    labels: &HemisphereLabels,
) -> Result<(usize, usize)> {
    let (rows, cols, subjects) = adj.dim();
    if rows != cols {
        return Err(Error::ShapeError(format!(
            "adjacency stack must be square in its first two dimensions, got {rows}x{cols}"
        )));
    }
    if dist.dim() != (rows, cols) {
        let (dr, dc) = dist.dim();
        return Err(Error::ShapeError(format!(
            "distance matrix is {dr}x{dc}, adjacency stack is {rows}x{cols}"
        )));
    }
    if labels.len() != rows {
        return Err(Error::ShapeError(format!(
            "{} hemisphere labels for {rows} nodes",
            labels.len()
        )));
    }
    if subjects == 0 {
        return Err(Error::DegenerateInput("adjacency stack has no subjects".into()));
    }

    if let Some(w) = adj.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::InvalidValue(format!(
            "connection weights must be finite and non-negative, found {w}"
        )));
    }
    if let Some(d) = dist.iter().find(|d| !d.is_finite() || **d < 0.0) {
        return Err(Error::InvalidValue(format!(
            "distances must be finite and non-negative, found {d}"
        )));
    }

    if *dist != dist.t() {
        warn!("distance matrix is not symmetric; only the upper triangle is used");
    }

    Ok((rows, subjects))
}

// ============================================================================
// Convenience entry point
// ============================================================================

/// Distance-dependent consensus threshold.
///
/// `adj` is `(n, n, s)`, `dist` is `(n, n)`, `hemiid[i]` is `true` for
/// right-hemisphere nodes. Returns `(G, Gc)`: the distance-dependent
/// consensus network and the consistency-thresholded network with the same
/// per-group edge counts.
pub fn threshold(
    adj: &Array3<f64>,
    dist: &Array2<f64>,
    hemiid: &[bool],
    nbins: usize,
) -> Result<(BinaryNetwork, BinaryNetwork)> {
    let thresholder = ConsensusThresholder::new(ThresholdConfig::new(nbins))?;
    let labels = HemisphereLabels::from_bools(hemiid);
    let networks = thresholder.run(adj, dist, &labels)?;
    Ok((networks.distance, networks.consistency))
}
