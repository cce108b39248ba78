//! Random health degradation, the simulation's only stochastic input.
//!
//! Uses `ChaCha8Rng` so a seed reproduces the same glitch sequence on every
//! platform and toolchain.

use petgraph::graph::NodeIndex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use cascade_core::constants::{GLITCH_MAX_DELTA, GLITCH_MIN_DELTA};

use crate::graph::ServiceGraph;

/// The outcome of one glitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glitch {
    pub service: NodeIndex,
    /// Amount drawn from the glitch range (before flooring at 0).
    pub delta: f64,
    /// Health after the drop.
    pub health: f64,
}

/// Seeded glitch injector. One per simulation run.
#[derive(Debug, Clone)]
pub struct Perturber {
    rng: ChaCha8Rng,
}

impl Perturber {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick one service uniformly at random and drop its health by a random
    /// amount, floored at 0. Returns `None` on an empty graph.
    ///
    /// Consumes exactly two draws per call: node selection, then delta.
    pub fn glitch(&mut self, graph: &mut ServiceGraph) -> Option<Glitch> {
        let count = graph.node_count();
        if count == 0 {
            return None;
        }
        let service = NodeIndex::new(self.rng.gen_range(0..count));
        let delta = self.rng.gen_range(GLITCH_MIN_DELTA..GLITCH_MAX_DELTA);

        let node = graph.node_mut(service);
        node.health = (node.health - delta).max(0.0);

        Some(Glitch {
            service,
            delta,
            health: node.health,
        })
    }
}
