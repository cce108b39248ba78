//! Observability for Cascade.
//! `tracing` crate with `EnvFilter`, plus one function per structured event.

pub mod events;
pub mod setup;

pub use setup::{init_tracing, init_tracing_with_filter};
