//! Diagnostics over the current graph state: blast radius downstream of each
//! failing service, and root causes upstream of it.

pub mod blast_radius;
pub mod root_cause;
pub mod types;

pub use blast_radius::{compute_all_blast_radii, compute_blast_radius};
pub use root_cause::{find_root_cause_paths, find_root_causes, RootCauseAnalyzer};
pub use types::BlastRadius;
