//! Simulation loop: drives ticks and records the diagnostic log and history.

pub mod events;
pub mod log;
pub mod runner;
pub mod snapshot;

pub use events::{EventDispatcher, SimulationEventHandler};
pub use log::DiagnosticLog;
pub use runner::{run_simulation, SimulationLoop, SimulationOutcome, SimulationState};
pub use snapshot::{Link, NodeSnapshot, TickSnapshot};
