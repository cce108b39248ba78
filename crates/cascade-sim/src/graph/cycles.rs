//! Cycle detection over `depends_on` edges.
//!
//! Three-colour depth-first search with an explicit stack. A back edge to a
//! node still on the current path closes a cycle. The result only degrades
//! root cause precision; it never blocks a simulation.

use petgraph::graph::NodeIndex;

use super::types::ServiceGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Finished,
}

/// Find the first dependency cycle, searching roots in definition order.
///
/// Returns the cycle as a closed path of names, e.g. `["a", "b", "c", "a"]`,
/// where each name depends on the next.
pub fn detect_cycle(graph: &ServiceGraph) -> Option<Vec<String>> {
    let mut marks = vec![Mark::Unvisited; graph.node_count()];

    for root in graph.node_indices() {
        if marks[root.index()] != Mark::Unvisited {
            continue;
        }
        if let Some(cycle) = dfs_from(graph, root, &mut marks) {
            return Some(cycle);
        }
    }
    None
}

/// Whether any service is reachable from itself via `depends_on`.
pub fn has_cycle(graph: &ServiceGraph) -> bool {
    detect_cycle(graph).is_some()
}

fn dfs_from(graph: &ServiceGraph, root: NodeIndex, marks: &mut [Mark]) -> Option<Vec<String>> {
    // Each frame holds a node, its upstream list, and the next one to visit.
    let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();
    marks[root.index()] = Mark::OnPath;
    stack.push((root, graph.depends_on(root), 0));

    while let Some((node, upstream, cursor)) = stack.last_mut() {
        let Some(&next) = upstream.get(*cursor) else {
            marks[node.index()] = Mark::Finished;
            stack.pop();
            continue;
        };
        *cursor += 1;

        match marks[next.index()] {
            Mark::Unvisited => {
                marks[next.index()] = Mark::OnPath;
                let next_upstream = graph.depends_on(next);
                stack.push((next, next_upstream, 0));
            }
            Mark::OnPath => {
                let start = stack
                    .iter()
                    .position(|(n, _, _)| *n == next)
                    .unwrap_or(0);
                let mut cycle: Vec<String> = stack[start..]
                    .iter()
                    .map(|(n, _, _)| graph.name(*n).to_string())
                    .collect();
                cycle.push(graph.name(next).to_string());
                cascade_core::tracing::events::cycle_detected(&cycle);
                return Some(cycle);
            }
            Mark::Finished => {}
        }
    }
    None
}
