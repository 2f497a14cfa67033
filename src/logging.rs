//! Logging initialization for the dashprefs binary.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `DASHPREFS_LOG` environment variable. Falls back to the `[logging]
//! log_level` from configuration when the variable is unset or invalid.
//!
//! # Usage
//!
//! ```bash
//! # Configured level (warn by default)
//! dashprefs show
//!
//! # Watch every store notification
//! DASHPREFS_LOG=dashboard_prefs=trace dashprefs apply density=compact
//! ```

use crate::config::schema::LogLevel;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding filter directives.
pub const LOG_ENV_VAR: &str = "DASHPREFS_LOG";

/// Builds the filter from explicit directives, or `fallback` if they are
/// missing or do not parse.
pub fn build_filter(directives: Option<&str>, fallback: LogLevel) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback.as_directive()))
}

/// Initialize the tracing subscriber.
///
/// Output goes to stderr so stdout stays clean for snapshots.
///
/// # Panics
///
/// Panics if a global subscriber has already been set (should only be
/// called once, at startup).
pub fn init(fallback: LogLevel) {
    let directives = std::env::var(LOG_ENV_VAR).ok();
    let filter = build_filter(directives.as_deref(), fallback);

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
