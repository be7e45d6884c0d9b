//! Diagnostics describing how a consensus network was assembled.

use serde::{Deserialize, Serialize};

use crate::model::HemisphereGroup;

/// Selection outcome for one distance bin within one hemisphere group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinReport {
    pub index: usize,
    /// Inclusive lower edge.
    pub lower: f64,
    /// Exclusive upper edge.
    pub upper: f64,
    /// Subject edges (one per subject per realized pair) falling in this bin.
    pub pooled_edges: usize,
    /// Group pairs whose distance falls in this bin.
    pub candidates: usize,
    /// Rounded number of pairs the bin should contribute.
    pub quota: usize,
    /// Pairs actually selected; below `quota` only when candidates run out.
    pub selected: usize,
}

/// Selection outcome for one hemisphere group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupReport {
    pub group: HemisphereGroup,
    /// Upper-triangle pairs belonging to the group.
    pub pairs: usize,
    pub pooled_edges: usize,
    /// Mean realized edges per subject (the group's target edge count).
    pub mean_edges_per_subject: f64,
    /// Edges placed in both output networks for this group.
    pub selected_edges: usize,
    pub bins: Vec<BinReport>,
}

/// Whole-run summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdReport {
    pub nodes: usize,
    pub subjects: usize,
    pub bin_edges: Vec<f64>,
    pub groups: Vec<GroupReport>,
}

impl ThresholdReport {
    pub fn group(&self, group: HemisphereGroup) -> Option<&GroupReport> {
        self.groups.iter().find(|g| g.group == group)
    }

    pub fn total_selected(&self) -> usize {
        self.groups.iter().map(|g| g.selected_edges).sum()
    }
}
