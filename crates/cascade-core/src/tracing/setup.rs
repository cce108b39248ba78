//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the Cascade tracing/logging system.
///
/// Reads the `CASCADE_LOG` environment variable for per-module log levels.
/// Format: `CASCADE_LOG=cascade_sim=debug,cascade_core=warn`
///
/// Falls back to `info` for the Cascade crates if `CASCADE_LOG` is not set
/// or is invalid.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("cascade_core=info,cascade_sim=info,cascade=info"));
        install(filter);
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);
    INIT.call_once(|| install(filter));
}

fn install(filter: EnvFilter) {
    // Diagnostic output goes to stderr so stdout stays clean for the run log.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();
}
