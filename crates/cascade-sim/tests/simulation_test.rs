//! End-to-end runs of the tick loop: log format, history, and determinism.

use cascade_core::{ServiceDefinition, SimulationConfig};
use cascade_sim::graph::build_graph;
use cascade_sim::simulation::SimulationState;
use cascade_sim::{run_simulation, ServiceGraph, SimulationLoop, SimulationOutcome};

fn topology() -> Vec<ServiceDefinition> {
    vec![
        ServiceDefinition::new("db", 0.9, &[]),
        ServiceDefinition::new("cache", 0.8, &["db"]),
        ServiceDefinition::new("auth", 0.85, &["db"]),
        ServiceDefinition::new("api", 0.9, &["auth", "cache"]),
        ServiceDefinition::new("web", 1.0, &["api"]),
        ServiceDefinition::new("worker", 0.7, &["db", "cache"]),
    ]
}

fn run(defs: &[ServiceDefinition], config: &SimulationConfig) -> SimulationOutcome {
    let mut graph = build_graph(defs).unwrap();
    run_simulation(&mut graph, config)
}

/// Split the log into per-tick blocks, marker first.
fn blocks(lines: &[String]) -> Vec<&[String]> {
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.starts_with("--- Tick"))
        .map(|(i, _)| i)
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(k, &s)| {
            let end = starts.get(k + 1).copied().unwrap_or(lines.len());
            &lines[s..end]
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Log format
// ---------------------------------------------------------------------------

#[test]
fn single_failing_service_produces_exact_log() {
    let defs = vec![ServiceDefinition::new("solo", 0.0, &[])];
    let config = SimulationConfig {
        ticks: 1,
        ..SimulationConfig::default()
    };

    let outcome = run(&defs, &config);

    assert_eq!(
        outcome.log.lines(),
        [
            "--- Tick 1 ---",
            "[ALERT] solo fell below threshold (0.00 < 0.5) at T=1",
            "[FAILED SERVICES] solo",
            "[BLAST] solo: radius=0, affected=[]",
            "[RCA] solo: root causes = solo",
        ]
    );
}

#[test]
fn two_service_chain_reports_blast_and_root_cause() {
    let mut graph: ServiceGraph = build_graph(&[
        ServiceDefinition::new("A", 0.0, &[]),
        ServiceDefinition::new("B", 0.0, &["A"]),
    ])
    .unwrap();
    let a = graph.get("A").unwrap();
    {
        let node = graph.node_mut(a);
        node.check_failed = true;
        node.has_ever_failed = true;
        node.failed_tick = Some(0);
        node.total_failures = 1;
    }
    let config = SimulationConfig {
        ticks: 1,
        cooldown: 100,
        ..SimulationConfig::default()
    };

    let outcome = run_simulation(&mut graph, &config);
    let lines = outcome.log.lines();

    assert_eq!(lines[0], "--- Tick 1 ---");
    assert!(lines[1].starts_with("[ALERT] "));
    assert!(lines[1].ends_with("fell below threshold (0.00 < 0.5) at T=1"));
    assert_eq!(
        &lines[2..],
        [
            "[FAILED SERVICES] A, B",
            "[BLAST] A: radius=1, affected=['B']",
            "[BLAST] B: radius=0, affected=[]",
            "[RCA] A: root causes = A",
            "[RCA] B: root causes = A",
        ]
    );
}

#[test]
fn every_tick_block_matches_its_snapshot() {
    let config = SimulationConfig {
        ticks: 25,
        seed: 7,
        ..SimulationConfig::default()
    };
    let outcome = run(&topology(), &config);
    let lines = outcome.log.lines();
    let blocks = blocks(lines);

    assert_eq!(blocks.len(), 25);
    for (i, block) in blocks.iter().enumerate() {
        let tick = i as u32 + 1;
        let snapshot = &outcome.history[tick as usize];
        assert_eq!(snapshot.tick, tick);
        assert_eq!(block[0], format!("--- Tick {tick} ---"));
        assert!(block[1].starts_with("[ALERT] "));
        assert!(block[1].ends_with(&format!("at T={tick}")));

        let failing: Vec<&str> = snapshot
            .nodes
            .iter()
            .filter(|n| n.check_failed)
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(block[2], format!("[FAILED SERVICES] {}", failing.join(", ")));

        let below = snapshot
            .nodes
            .iter()
            .filter(|n| n.health < config.threshold)
            .count();
        let blast = block.iter().filter(|l| l.starts_with("[BLAST] ")).count();
        let rca = block.iter().filter(|l| l.starts_with("[RCA] ")).count();
        assert_eq!(blast, below);
        assert_eq!(rca, failing.len());
        assert_eq!(block.len(), 3 + blast + rca);
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[test]
fn history_starts_with_the_untouched_topology() {
    let config = SimulationConfig {
        ticks: 5,
        ..SimulationConfig::default()
    };
    let outcome = run(&topology(), &config);

    assert_eq!(outcome.history.len(), 6);
    let baseline = &outcome.history[0];
    assert_eq!(baseline.tick, 0);
    for def in topology() {
        let node = baseline.node(&def.name).unwrap();
        assert_eq!(node.health, def.health);
        assert!(!node.check_failed);
        assert_eq!(node.failed_tick, None);
    }
}

#[test]
fn snapshots_keep_links_and_failure_bookkeeping_consistent() {
    let config = SimulationConfig {
        ticks: 40,
        seed: 3,
        ..SimulationConfig::default()
    };
    let outcome = run(&topology(), &config);
    let links = &outcome.history[0].links;
    assert_eq!(links.len(), 7);

    for snapshot in &outcome.history {
        assert_eq!(&snapshot.links, links);
        for node in &snapshot.nodes {
            assert!((0.0..=1.0).contains(&node.health));
            assert_eq!(node.check_failed, node.failed_tick.is_some());
            if node.check_failed {
                assert!(node.has_ever_failed);
                assert!(node.total_failures >= 1);
            }
        }
    }
}

#[test]
fn snapshots_serialize_with_id_and_link_fields() {
    let config = SimulationConfig {
        ticks: 1,
        ..SimulationConfig::default()
    };
    let outcome = run(&topology(), &config);
    let json = serde_json::to_value(&outcome.history[1]).unwrap();

    assert_eq!(json["tick"], 1);
    assert_eq!(json["nodes"][0]["id"], "db");
    assert_eq!(json["links"][0]["source"], "db");
    assert_eq!(json["links"][0]["target"], "cache");
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn same_seed_reproduces_the_run() {
    let config = SimulationConfig {
        ticks: 30,
        seed: 1234,
        ..SimulationConfig::default()
    };
    let first = run(&topology(), &config);
    let second = run(&topology(), &config);

    assert_eq!(first.log.lines(), second.log.lines());
    assert_eq!(first.history, second.history);
}

#[test]
fn different_seeds_diverge() {
    let base = SimulationConfig {
        ticks: 30,
        ..SimulationConfig::default()
    };
    let first = run(&topology(), &SimulationConfig { seed: 1, ..base });
    let second = run(&topology(), &SimulationConfig { seed: 2, ..base });
    assert_ne!(first.log.lines(), second.log.lines());
}

#[test]
fn stepping_matches_a_full_run() {
    let config = SimulationConfig {
        ticks: 10,
        seed: 99,
        ..SimulationConfig::default()
    };
    let full = run(&topology(), &config);

    let mut graph = build_graph(&topology()).unwrap();
    let mut sim = SimulationLoop::new(&mut graph, &config);
    let mut transitions = 0;
    while sim.step() != SimulationState::Completed {
        transitions += 1;
    }
    assert_eq!(transitions, 10);
    assert_eq!(sim.log().lines(), full.log.lines());
    assert_eq!(sim.history(), full.history.as_slice());
}
