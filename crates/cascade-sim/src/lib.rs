//! # cascade-sim
//!
//! The propagation, healing, and diagnostic engine.
//! Holds the service dependency graph (`petgraph`), injects glitches,
//! cascades failure and recovery, and answers root cause, blast radius,
//! and history queries over a finished run.

pub mod graph;
pub mod impact;
pub mod perturb;
pub mod propagation;
pub mod query;
pub mod session;
pub mod simulation;

pub use graph::{build_graph, ServiceGraph, ServiceNode};
pub use impact::{BlastRadius, RootCauseAnalyzer};
pub use perturb::Perturber;
pub use query::{handle_query, Query};
pub use session::Session;
pub use simulation::{run_simulation, DiagnosticLog, SimulationLoop, SimulationOutcome, TickSnapshot};
