//! Impact analysis types.

use serde::{Deserialize, Serialize};

/// Blast radius for a service: everything downstream that its failure reaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlastRadius {
    /// The service being analyzed.
    pub service: String,
    /// Transitive dependents, each listed once, in depth-first discovery order.
    pub affected: Vec<String>,
    /// `affected.len()`.
    pub radius: usize,
}
