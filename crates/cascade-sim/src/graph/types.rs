//! petgraph wrapper holding service nodes and their dependency edges.
//!
//! Edges point from an upstream dependency to the service that depends on it,
//! so `dependents` are outgoing neighbours and `depends_on` are incoming ones.
//! Both directions come from the same edge set and cannot disagree.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};

use cascade_core::types::FxHashMap;

/// Mutable per-tick state of one service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceNode {
    pub name: String,
    /// Always within `0.0..=1.0`.
    pub health: f64,
    /// Hysteresis flag. Set on failure, cleared only by healing.
    pub check_failed: bool,
    /// Tick at which the current failure episode began.
    pub failed_tick: Option<u32>,
    /// Monotonic: never cleared once set.
    pub has_ever_failed: bool,
    /// Number of failure episodes so far.
    pub total_failures: u32,
}

impl ServiceNode {
    pub fn new(name: impl Into<String>, health: f64) -> Self {
        Self {
            name: name.into(),
            health,
            check_failed: false,
            failed_tick: None,
            has_ever_failed: false,
            total_failures: 0,
        }
    }

    /// Clear the failure flag together with its episode start tick.
    pub(crate) fn clear_failure(&mut self) {
        self.check_failed = false;
        self.failed_tick = None;
    }
}

/// The underlying directed graph type. Edges carry no weight.
pub type DependencyGraph = DiGraph<ServiceNode, ()>;

/// Service graph with O(1) name lookup.
///
/// Node indices follow definition order, which is observable: glitch
/// selection, diagnostic listings, and snapshots all iterate in that order.
#[derive(Debug, Clone, Default)]
pub struct ServiceGraph {
    /// The petgraph directed graph.
    pub graph: DependencyGraph,
    /// Map from service name → NodeIndex.
    pub node_index: FxHashMap<String, NodeIndex>,
}

impl ServiceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a node index by service name.
    pub fn get(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(name).copied()
    }

    pub fn node(&self, idx: NodeIndex) -> &ServiceNode {
        &self.graph[idx]
    }

    pub fn node_mut(&mut self, idx: NodeIndex) -> &mut ServiceNode {
        &mut self.graph[idx]
    }

    pub fn name(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].name
    }

    /// Node indices in definition order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Nodes in definition order.
    pub fn nodes(&self) -> impl Iterator<Item = &ServiceNode> + '_ {
        self.graph.node_weights()
    }

    /// Services that depend on `idx`, in edge insertion order.
    pub fn dependents(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_in_insertion_order(idx, Direction::Outgoing)
    }

    /// Services `idx` depends on, in declaration order.
    pub fn depends_on(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.neighbors_in_insertion_order(idx, Direction::Incoming)
    }

    pub fn dependent_names(&self, idx: NodeIndex) -> Vec<String> {
        self.dependents(idx)
            .into_iter()
            .map(|d| self.name(d).to_string())
            .collect()
    }

    pub fn depends_on_names(&self, idx: NodeIndex) -> Vec<String> {
        self.depends_on(idx)
            .into_iter()
            .map(|d| self.name(d).to_string())
            .collect()
    }

    /// All `(source, target)` links where `target` depends on `source`,
    /// grouped by dependent in definition order.
    pub fn links(&self) -> Vec<(String, String)> {
        let mut links = Vec::with_capacity(self.edge_count());
        for idx in self.node_indices() {
            for dep in self.depends_on(idx) {
                links.push((self.name(dep).to_string(), self.name(idx).to_string()));
            }
        }
        links
    }

    /// Current health of every service, keyed by name.
    pub fn health_map(&self) -> FxHashMap<String, f64> {
        self.nodes().map(|n| (n.name.clone(), n.health)).collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    // petgraph's adjacency lists do not promise an order, so sort by edge id,
    // which is assigned in insertion order and never reused (no removals).
    fn neighbors_in_insertion_order(&self, idx: NodeIndex, dir: Direction) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(idx, dir)
            .map(|e| {
                let other = match dir {
                    Direction::Outgoing => e.target(),
                    Direction::Incoming => e.source(),
                };
                (e.id(), other)
            })
            .collect();
        edges.sort_by_key(|(id, _)| *id);
        edges.into_iter().map(|(_, n)| n).collect()
    }
}
