//! Distance-stratified selection for a single hemisphere group.
//!
//! ```text
//! subject edges ──pool by bin──► pooled_in_bin / pooled_total
//!                                        │
//!   tgt = pooled_total / subjects ───────┤
//!                                        ▼
//!   quota(bin) = round(tgt · pooled_in_bin / pooled_total)
//!   select top quota(bin) candidates by consistency      ──► G (group part)
//!   select top Σ selected group pairs by mean weight     ──► Gc (group part)
//! ```

use ndarray::{Array2, Array3};
use tracing::debug;

use crate::model::{ConnectivitySummary, DistanceBins, HemisphereGroup, HemisphereLabels};
use crate::{Error, Result};
use super::report::{BinReport, GroupReport};
use super::select::{top_k, Pair, TieBreak};

/// Borrowed view of everything a group selection reads. Shared read-only
/// between the two groups.
pub(crate) struct GroupInputs<'a> {
    pub adj: &'a Array3<f64>,
    pub dist: &'a Array2<f64>,
    pub labels: &'a HemisphereLabels,
    pub bins: &'a DistanceBins,
    pub summary: &'a ConnectivitySummary,
    pub tie_break: TieBreak,
}

/// Pairs chosen for one group, upper triangle only.
#[derive(Debug)]
pub(crate) struct GroupSelection {
    pub distance: Vec<Pair>,
    pub consistency: Vec<Pair>,
    pub report: GroupReport,
}

/// Rounded per-bin quota. Halves round to even.
pub(crate) fn bin_quota(target: f64, pooled_in_bin: usize, pooled_total: usize) -> usize {
    (target * pooled_in_bin as f64 / pooled_total as f64).round_ties_even() as usize
}

pub(crate) fn select_group(
    inputs: &GroupInputs<'_>,
    group: HemisphereGroup,
) -> Result<GroupSelection> {
    let n = inputs.labels.len();
    let subjects = inputs.adj.dim().2;
    let nbins = inputs.bins.len();

    let pairs: Vec<Pair> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .filter(|&(i, j)| inputs.labels.group(i, j) == group)
        .collect();

    // Pool subject edges and bucket candidates in one pass
    let mut pooled_per_bin = vec![0usize; nbins];
    let mut candidates: Vec<Vec<Pair>> = vec![Vec::new(); nbins];
    let mut pooled_total = 0usize;

    for &(i, j) in &pairs {
        let d = inputs.dist[[i, j]];
        if d == 0.0 {
            continue;
        }
        let Some(bin) = inputs.bins.bin_of(d) else {
            continue;
        };
        candidates[bin].push((i, j));

        let realized = (0..subjects).filter(|&k| inputs.adj[[i, j, k]] > 0.0).count();
        pooled_per_bin[bin] += realized;
        pooled_total += realized;
    }

    if pooled_total == 0 {
        return Err(Error::DegenerateInput(format!(
            "{group}-hemispheric group has no realized subject edges"
        )));
    }

    let target = pooled_total as f64 / subjects as f64;
    debug!(%group, pairs = pairs.len(), pooled_total, target, "pooled subject edges");

    let consistency = &inputs.summary.consistency;
    let mut distance_selected = Vec::new();
    let mut bin_reports = Vec::with_capacity(nbins);

    for (index, bin_candidates) in candidates.iter().enumerate() {
        let quota = bin_quota(target, pooled_per_bin[index], pooled_total);
        let chosen = top_k(bin_candidates, quota, inputs.tie_break, |(i, j)| {
            f64::from(consistency[[i, j]])
        });

        let (lower, upper) = inputs.bins.bounds(index);
        debug!(
            %group,
            bin = index,
            lower,
            upper,
            pooled = pooled_per_bin[index],
            candidates = bin_candidates.len(),
            quota,
            selected = chosen.len(),
            "bin selection"
        );

        bin_reports.push(BinReport {
            index,
            lower,
            upper,
            pooled_edges: pooled_per_bin[index],
            candidates: bin_candidates.len(),
            quota,
            selected: chosen.len(),
        });
        distance_selected.extend(chosen);
    }

    // Density-matched selection by mean weight, blind to distance
    let weight = &inputs.summary.mean_weight;
    let consistency_selected = top_k(&pairs, distance_selected.len(), inputs.tie_break, |(i, j)| {
        weight[[i, j]]
    });

    let report = GroupReport {
        group,
        pairs: pairs.len(),
        pooled_edges: pooled_total,
        mean_edges_per_subject: target,
        selected_edges: distance_selected.len(),
        bins: bin_reports,
    };

    Ok(GroupSelection {
        distance: distance_selected,
        consistency: consistency_selected,
        report,
    })
}
