//! Session: one isolated simulation context.
//!
//! Owns the graph, config, diagnostic log, tick history and health baseline
//! of its latest run. Separate sessions share nothing.

use serde::{Deserialize, Serialize};

use cascade_core::types::FxHashMap;
use cascade_core::{ServiceDefinition, SessionError, SimulationConfig};

use crate::graph::{build_graph, ServiceGraph};
use crate::query::{handle_query, handlers};
use crate::simulation::{
    DiagnosticLog, EventDispatcher, Link, SimulationLoop, TickSnapshot,
};

/// Everything retained from a completed run.
#[derive(Debug, Clone)]
struct CompletedRun {
    graph: ServiceGraph,
    config: SimulationConfig,
    log: DiagnosticLog,
    history: Vec<TickSnapshot>,
    baseline: FxHashMap<String, f64>,
}

/// Current state of one service, as served by [`Session::services`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub id: String,
    pub health: f64,
    pub check_failed: bool,
}

/// Current graph view: `{nodes: [{id, health, check_failed}], links}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    pub nodes: Vec<ServiceStatus>,
    pub links: Vec<Link>,
}

/// Liveness answer for [`Session::health`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Default)]
pub struct Session {
    run: Option<CompletedRun>,
    dispatcher: EventDispatcher,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session whose runs report to `dispatcher`.
    pub fn with_dispatcher(dispatcher: EventDispatcher) -> Self {
        Self {
            run: None,
            dispatcher,
        }
    }

    /// Build the graph, record the health baseline, and simulate.
    ///
    /// Replaces any previous run. On a graph integrity error the previous run
    /// is kept. Returns the diagnostic log lines.
    pub fn run(
        &mut self,
        defs: &[ServiceDefinition],
        config: &SimulationConfig,
    ) -> Result<&[String], SessionError> {
        config.validate()?;
        let mut graph = build_graph(defs)?;
        let baseline = graph.health_map();

        let outcome = SimulationLoop::new(&mut graph, config)
            .with_dispatcher(self.dispatcher.clone())
            .run();

        let run = self.run.insert(CompletedRun {
            graph,
            config: *config,
            log: outcome.log,
            history: outcome.history,
            baseline,
        });
        Ok(run.log.lines())
    }

    pub fn has_run(&self) -> bool {
        self.run.is_some()
    }

    /// Answer a diagnostic query about the latest run.
    pub fn query(&self, text: &str) -> Result<String, SessionError> {
        let run = self.completed()?;
        Ok(handle_query(text, &run.graph, &run.log, &run.baseline))
    }

    /// Root-cause set for one failing service, without chains.
    pub fn explain(&self, service: &str) -> Result<String, SessionError> {
        let run = self.completed()?;
        Ok(handlers::explain_failure(&run.graph, service))
    }

    /// Current status of every service plus the dependency links.
    pub fn services(&self) -> Result<GraphView, SessionError> {
        let run = self.completed()?;
        let nodes = run
            .graph
            .nodes()
            .map(|n| ServiceStatus {
                id: n.name.clone(),
                health: n.health,
                check_failed: n.check_failed,
            })
            .collect();
        let links = run
            .graph
            .links()
            .into_iter()
            .map(|(source, target)| Link { source, target })
            .collect();
        Ok(GraphView { nodes, links })
    }

    /// Full tick history of the latest run.
    pub fn ticks(&self) -> Result<&[TickSnapshot], SessionError> {
        let run = self.completed()?;
        if run.history.is_empty() {
            return Err(SessionError::NoCompletedRun);
        }
        Ok(&run.history)
    }

    pub fn log(&self) -> Result<&DiagnosticLog, SessionError> {
        Ok(&self.completed()?.log)
    }

    pub fn graph(&self) -> Result<&ServiceGraph, SessionError> {
        Ok(&self.completed()?.graph)
    }

    pub fn config(&self) -> Result<&SimulationConfig, SessionError> {
        Ok(&self.completed()?.config)
    }

    /// Health of every service before the first tick.
    pub fn baseline(&self) -> Result<&FxHashMap<String, f64>, SessionError> {
        Ok(&self.completed()?.baseline)
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".to_string(),
        }
    }

    fn completed(&self) -> Result<&CompletedRun, SessionError> {
        self.run.as_ref().ok_or(SessionError::NoCompletedRun)
    }
}
