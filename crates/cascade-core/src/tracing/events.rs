//! Structured log events for key simulation operations.
//!
//! Each function emits a `tracing` event with structured fields.

/// Log a random health drop injected into one service.
pub fn glitch_injected(tick: u32, service: &str, delta: f64, health: f64) {
    ::tracing::debug!(
        event = "glitch_injected",
        tick = tick,
        service = %service,
        delta = delta,
        health = health,
        "glitch injected"
    );
}

/// Log a service entering a new failure episode.
pub fn service_failed(tick: u32, service: &str, health: f64, total_failures: u32) {
    ::tracing::info!(
        event = "service_failed",
        tick = tick,
        service = %service,
        health = health,
        total_failures = total_failures,
        "service failed"
    );
}

/// Log a service whose failure flag was cleared.
pub fn service_recovered(service: &str, health: f64) {
    ::tracing::info!(
        event = "service_recovered",
        service = %service,
        health = health,
        "service recovered"
    );
}

/// Log a dependency cycle; root cause analysis becomes approximate.
pub fn cycle_detected(path: &[String]) {
    ::tracing::warn!(
        event = "cycle_detected",
        cycle = %path.join(" -> "),
        "cycle detected in dependency graph (RCA may be approximate)"
    );
}

/// Log the end of one tick.
pub fn tick_completed(tick: u32, failing: usize) {
    ::tracing::debug!(
        event = "tick_completed",
        tick = tick,
        failing = failing,
        "tick completed"
    );
}

/// Log the end of a simulation run.
pub fn simulation_completed(ticks: u32, services: usize, log_lines: usize) {
    ::tracing::info!(
        event = "simulation_completed",
        ticks = ticks,
        services = services,
        log_lines = log_lines,
        "simulation completed"
    );
}

/// Log a handled diagnostic query.
pub fn query_handled(kind: &str, query: &str) {
    ::tracing::debug!(
        event = "query_handled",
        kind = %kind,
        query = %query,
        "query handled"
    );
}
