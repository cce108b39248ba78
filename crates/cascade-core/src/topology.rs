//! Service topology input: the `{name, health, depends_on}` records a graph
//! is built from, and a JSON loader for them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::TopologyError;

/// One service record as supplied by the topology file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    pub name: String,
    pub health: f64,
    /// Upstream services this one relies on, in declaration order.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl ServiceDefinition {
    pub fn new(name: impl Into<String>, health: f64, depends_on: &[&str]) -> Self {
        Self {
            name: name.into(),
            health,
            depends_on: depends_on.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Read a JSON array of service definitions from `path`.
pub fn load_service_definitions(path: &Path) -> Result<Vec<ServiceDefinition>, TopologyError> {
    let content = std::fs::read_to_string(path).map_err(|_| TopologyError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let defs = parse_with_origin(&content, &path.display().to_string())?;
    tracing::debug!(services = defs.len(), path = %path.display(), "topology loaded");
    Ok(defs)
}

/// Parse a JSON array of service definitions from a string.
pub fn parse_service_definitions(json: &str) -> Result<Vec<ServiceDefinition>, TopologyError> {
    parse_with_origin(json, "<string>")
}

fn parse_with_origin(json: &str, origin: &str) -> Result<Vec<ServiceDefinition>, TopologyError> {
    serde_json::from_str(json).map_err(|e| TopologyError::ParseError {
        path: origin.to_string(),
        message: e.to_string(),
    })
}
