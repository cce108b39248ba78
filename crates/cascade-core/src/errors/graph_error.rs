//! Graph construction errors.

use super::error_code::{self, CascadeErrorCode};

/// Errors raised while building the service graph from definitions.
/// Any of these is fatal: the run cannot proceed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphIntegrityError {
    #[error("service '{service}' depends on unknown service '{dependency}'")]
    UnknownDependency { service: String, dependency: String },

    #[error("service '{name}' is defined more than once")]
    DuplicateService { name: String },

    #[error("service '{service}' lists dependency '{dependency}' more than once")]
    DuplicateDependency { service: String, dependency: String },

    #[error("service '{service}' has invalid initial health {health} (expected 0.0..=1.0)")]
    InvalidHealth { service: String, health: f64 },
}

impl CascadeErrorCode for GraphIntegrityError {
    fn error_code(&self) -> &'static str {
        error_code::GRAPH_INTEGRITY
    }
}
