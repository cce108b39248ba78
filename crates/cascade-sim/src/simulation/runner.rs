//! The tick-driving state machine.
//!
//! Per tick, in this order: glitch, failure propagation, healing, snapshot,
//! then diagnostics (failed services, blast radii, root causes).

use cascade_core::tracing::events;
use cascade_core::SimulationConfig;

use super::events::{
    EventDispatcher, GlitchEvent, ServiceFailedEvent, TickCompletedEvent, TickStartedEvent,
};
use super::log::DiagnosticLog;
use super::snapshot::TickSnapshot;
use crate::graph::ServiceGraph;
use crate::impact::{compute_all_blast_radii, BlastRadius, RootCauseAnalyzer};
use crate::perturb::Perturber;
use crate::propagation::{heal_services, propagate_failure};

/// Lifecycle of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationState {
    /// Nothing recorded yet.
    Initializing,
    /// `tick` is the next tick to execute.
    Running { tick: u32 },
    Completed,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, Default)]
pub struct SimulationOutcome {
    pub log: DiagnosticLog,
    /// `history[0]` is the pre-simulation state; `history[t]` follows tick `t`.
    pub history: Vec<TickSnapshot>,
}

/// Drives a simulation over a borrowed graph.
pub struct SimulationLoop<'g> {
    graph: &'g mut ServiceGraph,
    config: SimulationConfig,
    perturber: Perturber,
    analyzer: RootCauseAnalyzer,
    dispatcher: EventDispatcher,
    state: SimulationState,
    log: DiagnosticLog,
    history: Vec<TickSnapshot>,
}

impl<'g> SimulationLoop<'g> {
    /// Seed the perturber and check the topology for cycles once.
    pub fn new(graph: &'g mut ServiceGraph, config: &SimulationConfig) -> Self {
        let analyzer = RootCauseAnalyzer::new(graph);
        Self {
            graph,
            config: *config,
            perturber: Perturber::new(config.seed),
            analyzer,
            dispatcher: EventDispatcher::new(),
            state: SimulationState::Initializing,
            log: DiagnosticLog::new(),
            history: Vec::with_capacity(config.ticks as usize + 1),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: EventDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn log(&self) -> &DiagnosticLog {
        &self.log
    }

    pub fn history(&self) -> &[TickSnapshot] {
        &self.history
    }

    /// Advance the state machine by one transition and return the new state.
    pub fn step(&mut self) -> SimulationState {
        self.state = match self.state {
            SimulationState::Initializing => {
                self.history.push(TickSnapshot::capture(self.graph, 0));
                self.next_state_after(0)
            }
            SimulationState::Running { tick } => {
                self.run_tick(tick);
                self.next_state_after(tick)
            }
            SimulationState::Completed => SimulationState::Completed,
        };
        self.state
    }

    /// Run every remaining tick and hand back the log and history.
    pub fn run(mut self) -> SimulationOutcome {
        while self.step() != SimulationState::Completed {}

        events::simulation_completed(self.config.ticks, self.graph.node_count(), self.log.len());
        SimulationOutcome {
            log: self.log,
            history: self.history,
        }
    }

    fn next_state_after(&self, tick: u32) -> SimulationState {
        if tick >= self.config.ticks {
            SimulationState::Completed
        } else {
            SimulationState::Running { tick: tick + 1 }
        }
    }

    fn run_tick(&mut self, tick: u32) {
        let config = self.config;
        self.dispatcher.emit_tick_started(&TickStartedEvent { tick });
        self.log.push_tick_marker(tick);

        if let Some(glitch) = self.perturber.glitch(self.graph) {
            let name = self.graph.name(glitch.service).to_string();
            self.log.push(format!(
                "[ALERT] {name} fell below threshold ({:.2} < {}) at T={tick}",
                glitch.health, config.threshold
            ));
            events::glitch_injected(tick, &name, glitch.delta, glitch.health);
            self.dispatcher.emit_glitch(&GlitchEvent {
                tick,
                service: name,
                delta: glitch.delta,
                health: glitch.health,
            });

            for idx in propagate_failure(self.graph, glitch.service, tick, &config) {
                let node = self.graph.node(idx);
                self.dispatcher.emit_service_failed(&ServiceFailedEvent {
                    tick,
                    service: node.name.clone(),
                    health: node.health,
                });
            }
        }

        heal_services(self.graph, tick, &config);
        self.history.push(TickSnapshot::capture(self.graph, tick));

        let failing: Vec<_> = self
            .graph
            .node_indices()
            .filter(|&idx| self.graph.node(idx).check_failed)
            .collect();
        let failing_names: Vec<String> = failing
            .iter()
            .map(|&idx| self.graph.name(idx).to_string())
            .collect();
        self.log
            .push(format!("[FAILED SERVICES] {}", failing_names.join(", ")));

        for blast in compute_all_blast_radii(self.graph, &config) {
            self.log.push(format_blast_line(&blast));
        }

        for (&idx, name) in failing.iter().zip(&failing_names) {
            let roots = self.analyzer.root_causes(self.graph, idx);
            self.log
                .push(format!("[RCA] {name}: root causes = {}", roots.join(", ")));
        }

        events::tick_completed(tick, failing_names.len());
        self.dispatcher.emit_tick_completed(&TickCompletedEvent {
            tick,
            failing: failing_names,
        });
    }
}

/// Run a full simulation over `graph`.
pub fn run_simulation(graph: &mut ServiceGraph, config: &SimulationConfig) -> SimulationOutcome {
    SimulationLoop::new(graph, config).run()
}

fn format_blast_line(blast: &BlastRadius) -> String {
    let affected: Vec<String> = blast.affected.iter().map(|a| format!("'{a}'")).collect();
    format!(
        "[BLAST] {}: radius={}, affected=[{}]",
        blast.service,
        blast.radius,
        affected.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::build_graph;
    use cascade_core::ServiceDefinition;

    #[test]
    fn blast_line_lists_quoted_names() {
        let blast = BlastRadius {
            service: "db".to_string(),
            affected: vec!["api".to_string(), "web".to_string()],
            radius: 2,
        };
        assert_eq!(
            format_blast_line(&blast),
            "[BLAST] db: radius=2, affected=['api', 'web']"
        );
    }

    #[test]
    fn state_machine_walks_every_tick_then_completes() {
        let mut graph = build_graph(&[ServiceDefinition::new("a", 1.0, &[])]).unwrap();
        let config = SimulationConfig {
            ticks: 2,
            ..SimulationConfig::default()
        };
        let mut sim = SimulationLoop::new(&mut graph, &config);
        assert_eq!(sim.state(), SimulationState::Initializing);
        assert_eq!(sim.step(), SimulationState::Running { tick: 1 });
        assert_eq!(sim.history().len(), 1);
        assert_eq!(sim.step(), SimulationState::Running { tick: 2 });
        assert_eq!(sim.step(), SimulationState::Completed);
        assert_eq!(sim.step(), SimulationState::Completed);
        assert_eq!(sim.history().len(), 3);
    }

    #[test]
    fn zero_ticks_records_only_the_baseline() {
        let mut graph = build_graph(&[ServiceDefinition::new("a", 1.0, &[])]).unwrap();
        let config = SimulationConfig {
            ticks: 0,
            ..SimulationConfig::default()
        };
        let outcome = run_simulation(&mut graph, &config);
        assert!(outcome.log.is_empty());
        assert_eq!(outcome.history.len(), 1);
    }
}
