//! Downstream failure propagation.

use petgraph::graph::NodeIndex;

use cascade_core::tracing::events;
use cascade_core::types::FxHashSet;
use cascade_core::SimulationConfig;

use super::Frame;
use crate::graph::ServiceGraph;

/// Cascade failure from `start` through its dependents.
///
/// A service below `threshold` opens (or continues) a failure episode, then
/// every dependent loses `alpha * (threshold - health)`, floored at 0, and is
/// examined in turn, depth first in dependent order. A failing service is
/// expanded at most once per call; a dependent already expanded still takes
/// the hit but is not re-entered.
///
/// Returns the services that entered a new failure episode, in order.
pub fn propagate_failure(
    graph: &mut ServiceGraph,
    start: NodeIndex,
    tick: u32,
    config: &SimulationConfig,
) -> Vec<NodeIndex> {
    let mut newly_failed = Vec::new();
    let mut expanded = FxHashSet::default();
    let mut stack: Vec<Frame> = Vec::new();

    if let Some(frame) = enter(graph, start, tick, config, &mut expanded, &mut newly_failed) {
        stack.push(frame);
    }

    while let Some((node, dependents, cursor)) = stack.last_mut() {
        let Some(&dep) = dependents.get(*cursor) else {
            stack.pop();
            continue;
        };
        *cursor += 1;
        let node = *node;

        let hit = config.alpha * (config.threshold - graph.node(node).health);
        let target = graph.node_mut(dep);
        target.health = (target.health - hit).max(0.0);

        if let Some(frame) = enter(graph, dep, tick, config, &mut expanded, &mut newly_failed) {
            stack.push(frame);
        }
    }

    newly_failed
}

/// Examine one service. If it is below threshold and not yet expanded, mark
/// the failure episode and return a frame over its dependents.
fn enter(
    graph: &mut ServiceGraph,
    idx: NodeIndex,
    tick: u32,
    config: &SimulationConfig,
    expanded: &mut FxHashSet<NodeIndex>,
    newly_failed: &mut Vec<NodeIndex>,
) -> Option<Frame> {
    let node = graph.node_mut(idx);
    if node.health >= config.threshold || !expanded.insert(idx) {
        return None;
    }

    node.has_ever_failed = true;
    if !node.check_failed {
        node.failed_tick = Some(tick);
        node.total_failures += 1;
        events::service_failed(tick, &node.name, node.health, node.total_failures);
        newly_failed.push(idx);
    }
    node.check_failed = true;

    Some((idx, graph.dependents(idx), 0))
}
