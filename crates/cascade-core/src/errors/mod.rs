//! Error handling for Cascade.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod session_error;
pub mod topology_error;

pub use config_error::ConfigError;
pub use error_code::CascadeErrorCode;
pub use graph_error::GraphIntegrityError;
pub use session_error::SessionError;
pub use topology_error::TopologyError;
