//! One function per query kind. Each returns the display text.

use cascade_core::types::FxHashMap;

use crate::graph::ServiceGraph;
use crate::impact::{find_root_cause_paths, RootCauseAnalyzer};
use crate::simulation::DiagnosticLog;

/// Explain why `name` failed, with every failure chain from its root.
pub fn why_failing(graph: &ServiceGraph, name: &str) -> String {
    let Some(idx) = graph.get(name) else {
        return format!("Service '{name}' not found.");
    };
    let node = graph.node(idx);
    if !node.check_failed && !node.has_ever_failed {
        return format!("Service '{name}' has never failed during this simulation.");
    }

    let status = if node.check_failed {
        "is currently failing".to_string()
    } else {
        format!(
            "failed {} time(s) but has since recovered",
            node.total_failures
        )
    };

    let paths = find_root_cause_paths(graph, idx);
    if paths.iter().all(|p| p.len() <= 1) {
        return format!("Service '{name}' {status}. Root cause: independent failure.");
    }

    let mut lines = vec![format!("Service '{name}' {status}.\nFailure chain(s):")];
    for path in paths {
        let chain: Vec<&str> = path.iter().rev().map(String::as_str).collect();
        lines.push(format!("  {}", chain.join(" -> ")));
    }
    lines.join("\n")
}

/// Short root-cause-set answer for a currently failing service.
pub fn explain_failure(graph: &ServiceGraph, name: &str) -> String {
    let Some(idx) = graph.get(name) else {
        return format!("Service '{name}' not found.");
    };
    if !graph.node(idx).check_failed {
        return format!("Service '{name}' is not currently failing.");
    }
    let causes = RootCauseAnalyzer::new(graph).root_causes(graph, idx);
    format!(
        "Service '{name}' is failing. Root cause(s): {}.",
        causes.join(", ")
    )
}

/// Currently failing services, then recovered ones.
pub fn list_failures(graph: &ServiceGraph) -> String {
    let failing: Vec<String> = graph
        .nodes()
        .filter(|n| n.check_failed)
        .map(|n| {
            let tick = n
                .failed_tick
                .map(|t| t.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            format!("  {}: health={:.2}, failed at tick {tick}", n.name, n.health)
        })
        .collect();
    let recovered: Vec<String> = graph
        .nodes()
        .filter(|n| !n.check_failed && n.has_ever_failed)
        .map(|n| {
            format!(
                "  {}: health={:.2}, failed {} time(s)",
                n.name, n.health, n.total_failures
            )
        })
        .collect();

    if failing.is_empty() && recovered.is_empty() {
        return "No failures detected.".to_string();
    }

    let mut lines = Vec::new();
    if !failing.is_empty() {
        lines.push(format!("CURRENTLY FAILING ({}):", failing.len()));
        lines.extend(failing);
    }
    if !recovered.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(format!("RECOVERED ({}):", recovered.len()));
        lines.extend(recovered);
    }
    lines.join("\n")
}

/// The last `count` tick blocks of the log.
pub fn last_ticks(log: &DiagnosticLog, count: usize) -> String {
    log.last_tick_blocks(count).join("\n")
}

/// Every service ranked by health lost since the baseline, largest first.
/// Ties keep definition order. Services missing from the baseline are
/// measured against full health.
pub fn top_impacted(graph: &ServiceGraph, baseline: &FxHashMap<String, f64>) -> String {
    let mut ranked: Vec<(&str, f64)> = graph
        .nodes()
        .map(|n| {
            let before = baseline.get(&n.name).copied().unwrap_or(1.0);
            (n.name.as_str(), (before - n.health).max(0.0))
        })
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .iter()
        .map(|(name, degradation)| format!("{name}: cumulative degradation = {degradation:.3}"))
        .collect::<Vec<_>>()
        .join("\n")
}
