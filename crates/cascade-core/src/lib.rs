//! # cascade-core
//!
//! Foundation crate for the Cascade failure simulator.
//! Defines errors, config, topology loading, tracing, and constants.
//! The simulation engine and the CLI both depend on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod topology;
pub mod tracing;
pub mod types;

pub use config::SimulationConfig;
pub use errors::{
    CascadeErrorCode, ConfigError, GraphIntegrityError, SessionError, TopologyError,
};
pub use topology::ServiceDefinition;
