//! Shared constants for the Cascade simulator.

// ---- Simulation ----

/// Health gained by a failed service on each eligible heal step.
pub const HEAL_STEP: f64 = 0.1;

/// Absolute health ceiling. Heal propagation caps here, not at `heal_to`.
pub const MAX_HEALTH: f64 = 1.0;

/// Lower bound (inclusive) of the random health drop applied by a glitch.
pub const GLITCH_MIN_DELTA: f64 = 0.2;

/// Upper bound (exclusive) of the random health drop applied by a glitch.
pub const GLITCH_MAX_DELTA: f64 = 0.5;

// ---- Config defaults ----

pub const DEFAULT_THRESHOLD: f64 = 0.5;
pub const DEFAULT_ALPHA: f64 = 0.5;
pub const DEFAULT_COOLDOWN: u32 = 2;
pub const DEFAULT_HEAL_TO: f64 = 0.9;
pub const DEFAULT_TICKS: u32 = 20;
pub const DEFAULT_SEED: u64 = 42;

// ---- Diagnostics log ----

/// Prefix shared by every tick-boundary marker line in the diagnostic log.
pub const TICK_MARKER_PREFIX: &str = "--- Tick";

/// Number of tick blocks returned by `last` when no valid count is given.
pub const DEFAULT_LAST_TICKS: usize = 5;

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "CASCADE_LOG";
