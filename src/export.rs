//! Network export — write thresholded group networks for other tools.
//!
//! Three targets:
//!
//! ```text
//! BinaryNetwork ─► write_edge_list()     "i j" lines, one per undirected edge
//!               ─► export_cypher_dump()  CREATE / MATCH … CREATE statements
//! ConsensusNetworks ─► to_json()         both networks + selection report
//! ```
//!
//! The Cypher dump loads into Neo4j or any Cypher-compatible graph store,
//! with one `:Region` node per brain region and one `:CONNECTS`
//! relationship per group edge.

use std::io::Write;

use ndarray::Array2;

use crate::model::{BinaryNetwork, HemisphereLabels};
use crate::threshold::ConsensusNetworks;
use crate::{Error, Result};

/// Write one `i j` line per undirected edge, row-major over the upper triangle.
pub fn write_edge_list(network: &BinaryNetwork, writer: &mut dyn Write) -> Result<()> {
    for (i, j) in network.edges() {
        writeln!(writer, "{} {}", i, j)?;
    }
    Ok(())
}

/// Export a group network as a Cypher DUMP script.
///
/// Node `i` becomes `(:Region {_id: i, hemisphere: 'left'|'right'})`; every
/// edge becomes a `CONNECTS` relationship carrying its distance.
pub fn export_cypher_dump(
    network: &BinaryNetwork,
    labels: &HemisphereLabels,
    dist: &Array2<f64>,
    writer: &mut dyn Write,
) -> Result<()> {
    let n = network.node_count();
    if labels.len() != n || dist.dim() != (n, n) {
        return Err(Error::ShapeError(format!(
            "network has {n} nodes but {} labels and a {}x{} distance matrix",
            labels.len(),
            dist.nrows(),
            dist.ncols()
        )));
    }

    // Header
    writeln!(writer, "// consensus-net Cypher DUMP")?;
    writeln!(writer, "// Regions: {}", n)?;
    writeln!(writer, "// Connections: {}", network.edge_count())?;
    writeln!(writer)?;

    for (id, hemisphere) in labels.iter().enumerate() {
        writeln!(
            writer,
            "CREATE (n:Region {{_id: {}, hemisphere: '{}'}});",
            id, hemisphere
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "// Connections")?;

    for (i, j) in network.edges() {
        writeln!(
            writer,
            "MATCH (a {{_id: {}}}), (b {{_id: {}}}) CREATE (a)-[:CONNECTS {{distance: {}, group: '{}'}}]->(b);",
            i,
            j,
            format_distance(dist[[i, j]]),
            labels.group(i, j),
        )?;
    }

    Ok(())
}

/// Serialize both networks and the selection report as pretty JSON.
pub fn to_json(networks: &ConsensusNetworks) -> Result<String> {
    Ok(serde_json::to_string_pretty(networks)?)
}

/// Cypher float literal; whole numbers keep a trailing `.0`.
fn format_distance(d: f64) -> String {
    if d.fract() == 0.0 {
        format!("{:.1}", d)
    } else {
        format!("{}", d)
    }
}
