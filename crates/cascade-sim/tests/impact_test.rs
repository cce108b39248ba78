//! Blast radius and root cause analysis over fixed topologies.

use cascade_core::{ServiceDefinition, SimulationConfig};
use cascade_sim::graph::build_graph;
use cascade_sim::impact::{compute_all_blast_radii, compute_blast_radius, find_root_cause_paths};
use cascade_sim::{RootCauseAnalyzer, ServiceGraph};

fn diamond() -> ServiceGraph {
    build_graph(&[
        ServiceDefinition::new("A", 1.0, &[]),
        ServiceDefinition::new("B", 1.0, &["A"]),
        ServiceDefinition::new("C", 1.0, &["A"]),
        ServiceDefinition::new("D", 1.0, &["B", "C"]),
    ])
    .unwrap()
}

fn ring() -> ServiceGraph {
    build_graph(&[
        ServiceDefinition::new("A", 1.0, &["C"]),
        ServiceDefinition::new("B", 1.0, &["A"]),
        ServiceDefinition::new("C", 1.0, &["B"]),
    ])
    .unwrap()
}

fn fail(graph: &mut ServiceGraph, name: &str) {
    let idx = graph.get(name).unwrap();
    let node = graph.node_mut(idx);
    node.health = 0.1;
    node.check_failed = true;
    node.has_ever_failed = true;
    node.failed_tick = Some(1);
    node.total_failures = 1;
}

// ---------------------------------------------------------------------------
// Blast radius
// ---------------------------------------------------------------------------

#[test]
fn diamond_counts_shared_dependent_once() {
    let g = diamond();
    let blast = compute_blast_radius(&g, g.get("A").unwrap());

    assert_eq!(blast.service, "A");
    assert_eq!(blast.radius, 3);
    assert_eq!(blast.affected, vec!["B", "D", "C"]);
}

#[test]
fn cycle_never_lists_the_origin() {
    let g = ring();
    let blast = compute_blast_radius(&g, g.get("A").unwrap());

    assert_eq!(blast.radius, 2);
    assert!(!blast.affected.contains(&"A".to_string()));
}

#[test]
fn blast_radius_is_idempotent() {
    let g = diamond();
    let b = g.get("B").unwrap();
    assert_eq!(compute_blast_radius(&g, b), compute_blast_radius(&g, b));
}

#[test]
fn all_radii_cover_services_below_threshold_in_definition_order() {
    let mut g = diamond();
    fail(&mut g, "C");
    fail(&mut g, "A");

    let radii = compute_all_blast_radii(&g, &SimulationConfig::default());
    let services: Vec<&str> = radii.iter().map(|b| b.service.as_str()).collect();
    assert_eq!(services, vec!["A", "C"]);
    assert_eq!(radii[1].affected, vec!["D"]);
}

// ---------------------------------------------------------------------------
// Root cause analysis
// ---------------------------------------------------------------------------

#[test]
fn failing_chain_resolves_to_topmost_failure() {
    let mut g = diamond();
    fail(&mut g, "A");
    fail(&mut g, "B");
    fail(&mut g, "D");

    let analyzer = RootCauseAnalyzer::new(&g);
    assert!(!analyzer.is_cyclic());
    assert_eq!(analyzer.root_causes(&g, g.get("D").unwrap()), vec!["A"]);
}

#[test]
fn independent_failures_are_each_a_root() {
    let mut g = diamond();
    fail(&mut g, "B");
    fail(&mut g, "C");
    fail(&mut g, "D");

    let analyzer = RootCauseAnalyzer::new(&g);
    let roots = analyzer.root_causes(&g, g.get("D").unwrap());
    assert_eq!(roots, vec!["B", "C"]);
}

#[test]
fn cyclic_topology_reports_the_service_itself() {
    let mut g = ring();
    for name in ["A", "B", "C"] {
        fail(&mut g, name);
    }

    let analyzer = RootCauseAnalyzer::new(&g);
    assert!(analyzer.is_cyclic());
    for name in ["A", "B", "C"] {
        assert_eq!(analyzer.root_causes(&g, g.get(name).unwrap()), vec![name]);
    }
}

#[test]
fn root_causes_are_stable_across_calls() {
    let mut g = diamond();
    fail(&mut g, "A");
    fail(&mut g, "D");
    let analyzer = RootCauseAnalyzer::new(&g);
    let d = g.get("D").unwrap();
    assert_eq!(analyzer.root_causes(&g, d), analyzer.root_causes(&g, d));
}

#[test]
fn failure_chains_run_through_every_failed_parent() {
    let mut g = diamond();
    for name in ["A", "B", "C", "D"] {
        fail(&mut g, name);
    }

    let paths = find_root_cause_paths(&g, g.get("D").unwrap());
    assert_eq!(
        paths,
        vec![
            vec!["D".to_string(), "B".to_string(), "A".to_string()],
            vec!["D".to_string(), "C".to_string(), "A".to_string()],
        ]
    );
}

#[test]
fn failure_chains_stop_when_a_cycle_closes() {
    let mut g = ring();
    for name in ["A", "B", "C"] {
        fail(&mut g, name);
    }

    let paths = find_root_cause_paths(&g, g.get("A").unwrap());
    assert_eq!(
        paths,
        vec![vec!["A".to_string(), "C".to_string(), "B".to_string()]]
    );
}
