//! End-to-end tests for the consensus thresholding pipeline.
//!
//! Each test builds a small subject stack by hand and checks the exact
//! edges of the distance-dependent network `G` and the consistency network
//! `Gc`, along with the selection report.

use consensus_net::{
    threshold, ConsensusThresholder, Error, HemisphereGroup, HemisphereLabels,
    ThresholdConfig, TieBreak,
};
use ndarray::{Array2, Array3};
use pretty_assertions::assert_eq;

// ============================================================================
// Helpers
// ============================================================================

/// Symmetric subject stack from `(i, j, subject, weight)` entries.
fn stack(n: usize, subjects: usize, edges: &[(usize, usize, usize, f64)]) -> Array3<f64> {
    let mut adj = Array3::zeros((n, n, subjects));
    for &(i, j, k, w) in edges {
        adj[[i, j, k]] = w;
        adj[[j, i, k]] = w;
    }
    adj
}

/// Symmetric distance matrix from `(i, j, distance)` entries.
fn distances(n: usize, entries: &[(usize, usize, f64)]) -> Array2<f64> {
    let mut dist = Array2::zeros((n, n));
    for &(i, j, d) in entries {
        dist[[i, j]] = d;
        dist[[j, i]] = d;
    }
    dist
}

fn edges(net: &consensus_net::BinaryNetwork) -> Vec<(usize, usize)> {
    net.edges().collect()
}

// ============================================================================
// 1. Fully connected subjects: every bin quota equals its candidate count
// ============================================================================

#[test]
fn test_fully_connected_subjects() {
    let n = 4;
    let mut entries = Vec::new();
    let mut w = 1.0;
    for i in 0..n {
        for j in (i + 1)..n {
            for k in 0..3 {
                entries.push((i, j, k, w));
                w += 0.5;
            }
        }
    }
    let adj = stack(n, 3, &entries);
    let dist = distances(
        n,
        &[(0, 1, 1.0), (2, 3, 2.0), (0, 2, 3.0), (1, 3, 3.0), (0, 3, 4.0), (1, 2, 4.0)],
    );

    let (g, gc) = threshold(&adj, &dist, &[false, false, true, true], 2).unwrap();

    assert_eq!(g.edge_count(), 6);
    assert_eq!(gc.edge_count(), 6);
    assert_eq!(g.total(), gc.total());
    assert!(g.is_symmetric() && g.has_zero_diagonal() && g.is_binary());
    assert!(gc.is_symmetric() && gc.has_zero_diagonal() && gc.is_binary());
}

// ============================================================================
// 2. Sparse subjects: exact selections and tie-breaking
// ============================================================================

fn sparse_scenario() -> (Array3<f64>, Array2<f64>, HemisphereLabels) {
    let adj = stack(
        4,
        2,
        &[(0, 1, 0, 1.0), (0, 2, 0, 2.0), (1, 3, 0, 5.0), (0, 1, 1, 3.0), (1, 2, 1, 4.0)],
    );
    let dist = distances(
        4,
        &[(0, 1, 1.0), (2, 3, 2.0), (0, 2, 3.0), (1, 2, 3.0), (0, 3, 4.0), (1, 3, 4.0)],
    );
    (adj, dist, HemisphereLabels::from_bools(&[false, false, true, true]))
}

#[test]
fn test_sparse_subjects_first_discovered() {
    let (adj, dist, labels) = sparse_scenario();
    let thresholder = ConsensusThresholder::new(ThresholdConfig::new(2)).unwrap();
    let out = thresholder.run(&adj, &dist, &labels).unwrap();

    assert_eq!(edges(&out.distance), vec![(0, 1), (0, 2), (1, 2)]);
    assert_eq!(edges(&out.consistency), vec![(0, 1), (1, 2), (1, 3)]);

    let inter = out.report.group(HemisphereGroup::Inter).unwrap();
    assert_eq!(inter.pooled_edges, 3);
    assert_eq!(inter.mean_edges_per_subject, 1.5);
    assert_eq!(inter.bins[1].quota, 2);
    assert_eq!(out.report.total_selected(), 3);
}

#[test]
fn test_sparse_subjects_last_discovered() {
    let (adj, dist, labels) = sparse_scenario();
    let config = ThresholdConfig::new(2).with_tie_break(TieBreak::LastDiscovered);
    let out = ConsensusThresholder::new(config).unwrap().run(&adj, &dist, &labels).unwrap();

    assert_eq!(edges(&out.distance), vec![(0, 1), (1, 2), (1, 3)]);
    assert_eq!(out.distance.edge_count(), out.consistency.edge_count());
}

// ============================================================================
// 3. Length distribution is preserved where weight ranking is not
// ============================================================================

#[test]
fn test_length_distribution_preserved() {
    // Left: 0, 1, 2. Right: 3, 4, 5. Every inter pair sits at distance 20.
    let n = 6;
    let mut dist_entries = vec![
        (0, 1, 1.0),
        (3, 4, 1.0),
        (1, 2, 5.0),
        (4, 5, 5.0),
        (0, 2, 10.0),
        (3, 5, 10.0),
    ];
    for i in 0..3 {
        for j in 3..6 {
            dist_entries.push((i, j, 20.0));
        }
    }
    let dist = distances(n, &dist_entries);
    let adj = stack(
        n,
        2,
        &[
            (0, 1, 0, 1.0),
            (3, 4, 0, 1.0),
            (0, 2, 0, 9.0),
            (0, 3, 0, 2.0),
            (0, 1, 1, 1.0),
            (3, 4, 1, 1.0),
            (3, 5, 1, 8.0),
            (0, 3, 1, 2.0),
            (1, 4, 1, 6.0),
        ],
    );
    let labels = HemisphereLabels::from_bools(&[false, false, false, true, true, true]);

    let out = ConsensusThresholder::new(ThresholdConfig::new(4))
        .unwrap()
        .run(&adj, &dist, &labels)
        .unwrap();

    // Two short intra edges and one long one, as in the subjects
    assert_eq!(edges(&out.distance), vec![(0, 1), (0, 2), (0, 3), (1, 4), (3, 4)]);
    // Weight ranking trades the short (3, 4) for the heavy long (3, 5)
    assert_eq!(edges(&out.consistency), vec![(0, 1), (0, 2), (0, 3), (1, 4), (3, 5)]);

    let intra = out.report.group(HemisphereGroup::Intra).unwrap();
    let quotas: Vec<usize> = intra.bins.iter().map(|b| b.quota).collect();
    assert_eq!(quotas, vec![2, 1, 0, 0]);
    assert_eq!(intra.mean_edges_per_subject, 3.0);
    assert_eq!(intra.selected_edges, 3);
    assert_eq!(out.report.bin_edges, vec![1.0, 5.75, 10.5, 15.25, 21.0]);
}

// ============================================================================
// 4. Zero-distance pairs: skipped by binning, still ranked by weight
// ============================================================================

#[test]
fn test_zero_distance_pair_only_in_weight_network() {
    // (0, 1) is the heaviest and most consistent pair but has no length
    let adj = stack(
        4,
        2,
        &[
            (0, 1, 0, 100.0),
            (0, 1, 1, 100.0),
            (2, 3, 0, 1.0),
            (2, 3, 1, 1.0),
            (0, 2, 0, 2.0),
            (0, 2, 1, 2.0),
        ],
    );
    let dist = distances(
        4,
        &[(0, 1, 0.0), (2, 3, 1.0), (0, 2, 2.0), (0, 3, 3.0), (1, 2, 3.0), (1, 3, 3.0)],
    );
    let labels = HemisphereLabels::from_bools(&[false, false, true, true]);

    let out = ConsensusThresholder::new(ThresholdConfig::new(2))
        .unwrap()
        .run(&adj, &dist, &labels)
        .unwrap();

    assert!(!out.distance.contains(0, 1));
    assert!(out.consistency.contains(0, 1));
    assert_eq!(edges(&out.distance), vec![(0, 2), (2, 3)]);
    assert_eq!(edges(&out.consistency), vec![(0, 1), (0, 2)]);

    let intra = out.report.group(HemisphereGroup::Intra).unwrap();
    assert_eq!(intra.pooled_edges, 2);
    assert_eq!(intra.bins.iter().map(|b| b.candidates).sum::<usize>(), 1);
    assert_eq!(intra.selected_edges, 1);
}

// ============================================================================
// 5. Degenerate inputs
// ============================================================================

#[test]
fn test_all_zero_distances_rejected() {
    let adj = stack(3, 1, &[(0, 1, 0, 1.0), (1, 2, 0, 1.0)]);
    let dist = Array2::zeros((3, 3));
    let err = threshold(&adj, &dist, &[false, true, true], 2).unwrap_err();
    assert!(matches!(err, Error::DegenerateInput(_)), "got {err}");
}

#[test]
fn test_single_hemisphere_rejected() {
    // No inter-hemispheric pairs exist, so that group pools nothing
    let adj = stack(3, 1, &[(0, 1, 0, 1.0), (1, 2, 0, 1.0)]);
    let dist = distances(3, &[(0, 1, 1.0), (1, 2, 2.0), (0, 2, 3.0)]);
    let err = threshold(&adj, &dist, &[false, false, false], 2).unwrap_err();
    assert!(matches!(err, Error::DegenerateInput(_)), "got {err}");
}

#[test]
fn test_group_without_subject_edges_rejected() {
    // Only intra edges are realized
    let adj = stack(4, 2, &[(0, 1, 0, 1.0), (2, 3, 1, 1.0)]);
    let dist = distances(
        4,
        &[(0, 1, 1.0), (2, 3, 1.0), (0, 2, 2.0), (0, 3, 2.0), (1, 2, 2.0), (1, 3, 2.0)],
    );
    let err = threshold(&adj, &dist, &[false, false, true, true], 2).unwrap_err();
    assert!(matches!(err, Error::DegenerateInput(_)), "got {err}");
}

#[test]
fn test_non_square_stack_fails_fast() {
    let adj = Array3::zeros((4, 3, 2));
    let dist = Array2::zeros((4, 4));
    let err = threshold(&adj, &dist, &[false, false, true, true], 2).unwrap_err();
    assert!(matches!(err, Error::ShapeError(_)));
}

#[test]
fn test_distance_shape_mismatch() {
    let adj = Array3::zeros((4, 4, 2));
    let dist = Array2::zeros((3, 3));
    let err = threshold(&adj, &dist, &[false, false, true, true], 2).unwrap_err();
    assert!(matches!(err, Error::ShapeError(_)));
}

// ============================================================================
// 6. Inputs are not mutated; outputs are reproducible
// ============================================================================

#[test]
fn test_inputs_untouched_and_deterministic() {
    let (adj, dist, labels) = sparse_scenario();
    let adj_before = adj.clone();
    let dist_before = dist.clone();

    let thresholder = ConsensusThresholder::new(ThresholdConfig::new(2)).unwrap();
    let first = thresholder.run(&adj, &dist, &labels).unwrap();
    let second = thresholder.run(&adj, &dist, &labels).unwrap();

    assert_eq!(first, second);
    assert_eq!(adj, adj_before);
    assert_eq!(dist, dist_before);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_flag_matches_sequential() {
    let (adj, dist, labels) = sparse_scenario();
    let sequential = ConsensusThresholder::new(ThresholdConfig::new(2))
        .unwrap()
        .run(&adj, &dist, &labels)
        .unwrap();
    let parallel = ConsensusThresholder::new(ThresholdConfig::new(2).with_parallel(true))
        .unwrap()
        .run(&adj, &dist, &labels)
        .unwrap();
    assert_eq!(sequential, parallel);
}

// ============================================================================
// 7. Integer hemisphere codes
// ============================================================================

#[test]
fn test_hemisphere_codes() {
    let (adj, dist, _) = sparse_scenario();
    let labels = HemisphereLabels::from_codes(&[1, 1, 2, 2], 2);
    let out = ConsensusThresholder::new(ThresholdConfig::new(2))
        .unwrap()
        .run(&adj, &dist, &labels)
        .unwrap();
    let (g, _) = threshold(&adj, &dist, &[false, false, true, true], 2).unwrap();
    assert_eq!(out.distance, g);
}
