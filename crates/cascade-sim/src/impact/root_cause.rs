//! Root cause analysis: walk upstream through failed dependencies.

use petgraph::graph::NodeIndex;

use cascade_core::types::FxHashSet;

use crate::graph::cycles;
use crate::graph::ServiceGraph;

/// Root cause analyzer bound to one graph topology.
///
/// Topology never changes during a run, so the whole-graph cycle check is
/// done once at construction and cached.
#[derive(Debug, Clone, Copy)]
pub struct RootCauseAnalyzer {
    cyclic: bool,
}

impl RootCauseAnalyzer {
    pub fn new(graph: &ServiceGraph) -> Self {
        Self {
            cyclic: cycles::has_cycle(graph),
        }
    }

    /// Whether the topology contains a `depends_on` cycle.
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// Root causes of `service`. See [`find_root_causes`].
    pub fn root_causes(&self, graph: &ServiceGraph, service: NodeIndex) -> Vec<String> {
        find_root_causes(graph, service, self.cyclic)
    }

    /// Failure chains of `service`. See [`find_root_cause_paths`].
    pub fn root_cause_paths(&self, graph: &ServiceGraph, service: NodeIndex) -> Vec<Vec<String>> {
        find_root_cause_paths(graph, service)
    }
}

/// Find the failing ancestors of `service` that have no failing upstream.
///
/// Follows every `depends_on` edge whose target is currently `check_failed`.
/// A service with no failing upstream is a root; several independent roots
/// are possible. Roots are returned once each, in discovery order.
///
/// When `cyclic` is set the topology is not a DAG and the walk is skipped:
/// the service is reported as its own root cause.
pub fn find_root_causes(graph: &ServiceGraph, service: NodeIndex, cyclic: bool) -> Vec<String> {
    if cyclic {
        return vec![graph.name(service).to_string()];
    }

    let mut roots = Vec::new();
    let mut visited = FxHashSet::default();
    let mut stack = vec![service];

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        let failing: Vec<NodeIndex> = graph
            .depends_on(node)
            .into_iter()
            .filter(|&up| graph.node(up).check_failed)
            .collect();

        if failing.is_empty() {
            roots.push(graph.name(node).to_string());
        } else {
            stack.extend(failing.into_iter().rev());
        }
    }

    roots
}

/// Every maximal upstream chain from `service` through dependencies that are
/// failing now or have failed before.
///
/// Each chain starts at `service` and ends at a service with no such
/// upstream: `[service, parent, ..., root]`. A service with several failed
/// dependencies yields several chains. A dependency already on the current
/// chain is not re-entered, so cycles end the chain instead of looping.
pub fn find_root_cause_paths(graph: &ServiceGraph, service: NodeIndex) -> Vec<Vec<String>> {
    let mut paths = Vec::new();
    let mut path = vec![service];

    let first = failed_upstreams(graph, service, &path);
    if first.is_empty() {
        return vec![names(graph, &path)];
    }

    let mut stack: Vec<(Vec<NodeIndex>, usize)> = vec![(first, 0)];
    while let Some((upstreams, cursor)) = stack.last_mut() {
        let Some(&next) = upstreams.get(*cursor) else {
            stack.pop();
            path.pop();
            continue;
        };
        *cursor += 1;

        path.push(next);
        let next_upstreams = failed_upstreams(graph, next, &path);
        if next_upstreams.is_empty() {
            paths.push(names(graph, &path));
            path.pop();
        } else {
            stack.push((next_upstreams, 0));
        }
    }

    paths
}

fn failed_upstreams(graph: &ServiceGraph, node: NodeIndex, path: &[NodeIndex]) -> Vec<NodeIndex> {
    graph
        .depends_on(node)
        .into_iter()
        .filter(|up| {
            let n = graph.node(*up);
            (n.check_failed || n.has_ever_failed) && !path.contains(up)
        })
        .collect()
}

fn names(graph: &ServiceGraph, path: &[NodeIndex]) -> Vec<String> {
    path.iter().map(|idx| graph.name(*idx).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use cascade_core::ServiceDefinition;

    fn fail(graph: &mut ServiceGraph, name: &str) {
        let idx = graph.get(name).unwrap();
        let node = graph.node_mut(idx);
        node.check_failed = true;
        node.has_ever_failed = true;
    }

    #[test]
    fn walks_through_failing_upstreams_only() {
        // db ← cache ← api, auth ← api; db and cache failing, auth healthy.
        let mut g = build_graph(&[
            ServiceDefinition::new("db", 1.0, &[]),
            ServiceDefinition::new("auth", 1.0, &[]),
            ServiceDefinition::new("cache", 1.0, &["db"]),
            ServiceDefinition::new("api", 1.0, &["cache", "auth"]),
        ])
        .unwrap();
        for name in ["db", "cache", "api"] {
            fail(&mut g, name);
        }
        let api = g.get("api").unwrap();
        assert_eq!(find_root_causes(&g, api, false), vec!["db"]);
    }

    #[test]
    fn independent_roots_are_all_reported() {
        let mut g = build_graph(&[
            ServiceDefinition::new("a", 1.0, &[]),
            ServiceDefinition::new("b", 1.0, &[]),
            ServiceDefinition::new("c", 1.0, &["a", "b"]),
        ])
        .unwrap();
        for name in ["a", "b", "c"] {
            fail(&mut g, name);
        }
        let c = g.get("c").unwrap();
        assert_eq!(find_root_causes(&g, c, false), vec!["a", "b"]);
    }

    #[test]
    fn recovered_upstreams_still_appear_in_chains() {
        let mut g = build_graph(&[
            ServiceDefinition::new("a", 1.0, &[]),
            ServiceDefinition::new("b", 1.0, &["a"]),
            ServiceDefinition::new("c", 1.0, &["b"]),
        ])
        .unwrap();
        fail(&mut g, "c");
        fail(&mut g, "a");
        let b = g.get("b").unwrap();
        g.node_mut(b).has_ever_failed = true;

        let c = g.get("c").unwrap();
        assert_eq!(find_root_cause_paths(&g, c), vec![vec!["c", "b", "a"]]);
        // Root-cause sets only follow currently failing services.
        assert_eq!(find_root_causes(&g, c, false), vec!["c"]);
    }

    #[test]
    fn chain_stops_at_cycle() {
        let mut g = build_graph(&[
            ServiceDefinition::new("a", 1.0, &["b"]),
            ServiceDefinition::new("b", 1.0, &["a"]),
        ])
        .unwrap();
        fail(&mut g, "a");
        fail(&mut g, "b");
        let a = g.get("a").unwrap();
        assert_eq!(find_root_cause_paths(&g, a), vec![vec!["a", "b"]]);
    }
}
