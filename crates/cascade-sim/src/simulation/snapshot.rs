//! Immutable per-tick snapshots of graph state.
//!
//! The serialized shape is `{tick, nodes: [{id, health, check_failed,
//! failed_tick, has_ever_failed, total_failures}], links: [{source, target}]}`.

use serde::{Deserialize, Serialize};

use crate::graph::ServiceGraph;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub health: f64,
    pub check_failed: bool,
    pub failed_tick: Option<u32>,
    pub has_ever_failed: bool,
    pub total_failures: u32,
}

/// A dependency link: `target` depends on `source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickSnapshot {
    pub tick: u32,
    pub nodes: Vec<NodeSnapshot>,
    pub links: Vec<Link>,
}

impl TickSnapshot {
    /// Capture the complete state of every service at `tick`.
    pub fn capture(graph: &ServiceGraph, tick: u32) -> Self {
        let nodes = graph
            .nodes()
            .map(|n| NodeSnapshot {
                id: n.name.clone(),
                health: n.health,
                check_failed: n.check_failed,
                failed_tick: n.failed_tick,
                has_ever_failed: n.has_ever_failed,
                total_failures: n.total_failures,
            })
            .collect();

        let links = graph
            .links()
            .into_iter()
            .map(|(source, target)| Link { source, target })
            .collect();

        Self { tick, nodes, links }
    }

    /// Look up one service's state in this snapshot.
    pub fn node(&self, id: &str) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|n| n.id == id)
    }
}
