//! Service topology loading errors.

use super::error_code::{self, CascadeErrorCode};

/// Errors that can occur while reading service definitions.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("Topology file not found: {path}")]
    FileNotFound { path: String },

    #[error("Topology parse error in {path}: {message}")]
    ParseError { path: String, message: String },
}

impl CascadeErrorCode for TopologyError {
    fn error_code(&self) -> &'static str {
        error_code::TOPOLOGY_ERROR
    }
}
