//! Session-level errors.

use super::error_code::{self, CascadeErrorCode};
use super::{ConfigError, GraphIntegrityError, TopologyError};

/// Errors surfaced by a simulation session.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no simulation has completed in this session; run one first")]
    NoCompletedRun,

    #[error("Graph error: {0}")]
    Graph(#[from] GraphIntegrityError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Topology error: {0}")]
    Topology(#[from] TopologyError),
}

impl CascadeErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoCompletedRun => error_code::NO_COMPLETED_RUN,
            Self::Graph(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Topology(e) => e.error_code(),
        }
    }
}
