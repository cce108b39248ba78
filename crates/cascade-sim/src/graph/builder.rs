//! Graph construction from service definitions.

use cascade_core::errors::GraphIntegrityError;
use cascade_core::types::FxHashSet;
use cascade_core::ServiceDefinition;

use super::types::{ServiceGraph, ServiceNode};

/// Build the service graph.
///
/// Every node is inserted before any dependency is resolved, so a service may
/// depend on one defined later in the list. Edges are linked in definition
/// order, which fixes the order of both `depends_on` and `dependents`.
pub fn build_graph(defs: &[ServiceDefinition]) -> Result<ServiceGraph, GraphIntegrityError> {
    let mut graph = ServiceGraph::new();

    for def in defs {
        if graph.node_index.contains_key(&def.name) {
            return Err(GraphIntegrityError::DuplicateService {
                name: def.name.clone(),
            });
        }
        if !def.health.is_finite() || !(0.0..=1.0).contains(&def.health) {
            return Err(GraphIntegrityError::InvalidHealth {
                service: def.name.clone(),
                health: def.health,
            });
        }
        let idx = graph.graph.add_node(ServiceNode::new(def.name.clone(), def.health));
        graph.node_index.insert(def.name.clone(), idx);
    }

    for def in defs {
        let target = graph.node_index[&def.name];
        let mut seen = FxHashSet::default();
        for dep in &def.depends_on {
            if !seen.insert(dep.as_str()) {
                return Err(GraphIntegrityError::DuplicateDependency {
                    service: def.name.clone(),
                    dependency: dep.clone(),
                });
            }
            let source = graph.get(dep).ok_or_else(|| GraphIntegrityError::UnknownDependency {
                service: def.name.clone(),
                dependency: dep.clone(),
            })?;
            graph.graph.add_edge(source, target, ());
        }
    }

    tracing::debug!(
        services = graph.node_count(),
        edges = graph.edge_count(),
        "service graph built"
    );
    Ok(graph)
}
