//! CascadeErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// to callers that cannot match on Rust types (CLI exit output, JSON).
pub trait CascadeErrorCode {
    /// Returns the error code string (e.g., "GRAPH_INTEGRITY").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const GRAPH_INTEGRITY: &str = "GRAPH_INTEGRITY";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const TOPOLOGY_ERROR: &str = "TOPOLOGY_ERROR";
pub const NO_COMPLETED_RUN: &str = "NO_COMPLETED_RUN";
