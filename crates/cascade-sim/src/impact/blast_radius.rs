//! Blast radius computation via transitive dependent analysis.

use petgraph::graph::NodeIndex;

use cascade_core::types::FxHashSet;
use cascade_core::SimulationConfig;

use super::types::BlastRadius;
use crate::graph::ServiceGraph;

/// Compute the blast radius of one service.
///
/// Depth-first, pre-order walk over `dependents` with a visited set. A service
/// reachable along several paths is counted once, and the origin is never
/// counted even when a cycle leads back to it.
pub fn compute_blast_radius(graph: &ServiceGraph, service: NodeIndex) -> BlastRadius {
    let affected: Vec<String> = transitive_dependents(graph, service)
        .into_iter()
        .map(|idx| graph.name(idx).to_string())
        .collect();

    BlastRadius {
        service: graph.name(service).to_string(),
        radius: affected.len(),
        affected,
    }
}

/// Blast radius for every service currently below threshold, in definition order.
pub fn compute_all_blast_radii(graph: &ServiceGraph, config: &SimulationConfig) -> Vec<BlastRadius> {
    graph
        .node_indices()
        .filter(|&idx| graph.node(idx).health < config.threshold)
        .map(|idx| compute_blast_radius(graph, idx))
        .collect()
}

fn transitive_dependents(graph: &ServiceGraph, start: NodeIndex) -> Vec<NodeIndex> {
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut result = Vec::new();

    // Push in reverse so the first dependent is explored first.
    let mut stack: Vec<NodeIndex> = graph.dependents(start).into_iter().rev().collect();
    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        result.push(node);
        stack.extend(graph.dependents(node).into_iter().rev());
    }

    result
}
