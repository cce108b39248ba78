//! Configuration system for Cascade.
//! TOML or YAML file, 3-layer resolution: CLI > env > file > defaults.

pub mod simulation_config;

pub use simulation_config::{CliOverrides, SimulationConfig};
