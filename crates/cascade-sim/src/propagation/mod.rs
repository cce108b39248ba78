//! Cascading state changes: failure flows downstream when a service degrades,
//! recovery flows downstream when one heals.
//!
//! Both traversals run on an explicit stack with a visited set, so a cyclic
//! `dependents` graph terminates and deep graphs cannot exhaust the call stack.

pub mod failure;
pub mod heal;

pub use failure::propagate_failure;
pub use heal::{heal_services, propagate_heal};

use petgraph::graph::NodeIndex;

/// Explicit-stack frame: a node, its dependents, and the next one to visit.
type Frame = (NodeIndex, Vec<NodeIndex>, usize);
