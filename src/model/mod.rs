//! # Connectivity Model
//!
//! Value types shared by the thresholder and the exporters: hemisphere
//! labels, distance bins, the group summary of a subject stack, and the
//! binary output network.
//!
//! Design rule: this module is pure data. No I/O, no logging, no state.

pub mod hemisphere;
pub mod bins;
pub mod summary;
pub mod network;

pub use hemisphere::{Hemisphere, HemisphereGroup, HemisphereLabels};
pub use bins::{DistanceBins, TOP_EDGE_WIDENING};
pub use summary::ConnectivitySummary;
pub use network::BinaryNetwork;
