//! Service dependency graph: node state, construction, and cycle detection.

pub mod builder;
pub mod cycles;
pub mod types;

pub use builder::build_graph;
pub use types::{ServiceGraph, ServiceNode};
