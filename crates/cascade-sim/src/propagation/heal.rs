//! Cooldown-gated healing and downstream recovery propagation.

use petgraph::graph::NodeIndex;

use cascade_core::constants::{HEAL_STEP, MAX_HEALTH};
use cascade_core::tracing::events;
use cascade_core::types::FxHashSet;
use cascade_core::SimulationConfig;

use super::Frame;
use crate::graph::ServiceGraph;

/// Advance every failed service whose cooldown has elapsed.
///
/// A service that has been failing since `failed_tick` heals once
/// `tick - failed_tick >= cooldown`: its health rises by `HEAL_STEP`, capped
/// at `heal_to`. Reaching `threshold` closes the episode. Each heal step is
/// then propagated to dependents.
///
/// Services are visited in definition order. Returns those that took a step.
pub fn heal_services(graph: &mut ServiceGraph, tick: u32, config: &SimulationConfig) -> Vec<NodeIndex> {
    let candidates: Vec<NodeIndex> = graph.node_indices().collect();
    let mut healed = Vec::new();

    for idx in candidates {
        let node = graph.node_mut(idx);
        if !node.check_failed {
            continue;
        }
        let Some(failed_tick) = node.failed_tick else {
            continue;
        };
        if tick.saturating_sub(failed_tick) < config.cooldown {
            continue;
        }

        let old_health = node.health;
        node.health = (node.health + HEAL_STEP).min(config.heal_to);
        if node.health >= config.threshold {
            node.clear_failure();
            events::service_recovered(&node.name, node.health);
        }
        healed.push(idx);

        propagate_heal(graph, idx, old_health, config);
    }

    healed
}

/// Raise dependents of `start` after it healed from `old_health`.
///
/// Each dependent gains `alpha * max(0, parent.health - old_health)`, capped
/// at 1.0. The baseline stays the originating service's old health at every
/// depth. A dependent reaching `threshold` has both its failure flag and its
/// episode start cleared. Only dependents that actually rose are followed.
pub fn propagate_heal(
    graph: &mut ServiceGraph,
    start: NodeIndex,
    old_health: f64,
    config: &SimulationConfig,
) {
    let mut expanded = FxHashSet::default();
    expanded.insert(start);
    let mut stack: Vec<Frame> = vec![(start, graph.dependents(start), 0)];

    while let Some((node, dependents, cursor)) = stack.last_mut() {
        let Some(&dep) = dependents.get(*cursor) else {
            stack.pop();
            continue;
        };
        *cursor += 1;
        let node = *node;

        let delta = config.alpha * (graph.node(node).health - old_health).max(0.0);
        let target = graph.node_mut(dep);
        let new_health = (target.health + delta).min(MAX_HEALTH);
        if new_health <= target.health {
            continue;
        }

        target.health = new_health;
        if new_health >= config.threshold {
            if target.check_failed {
                events::service_recovered(&target.name, new_health);
            }
            target.clear_failure();
        }

        if expanded.insert(dep) {
            stack.push((dep, graph.dependents(dep), 0));
        }
    }
}
