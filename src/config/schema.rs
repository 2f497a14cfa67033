//! TOML configuration schema types for dashboard preferences.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so a partial file only overrides what it names.
//! Enumeration values are checked by serde while parsing, so an unknown
//! density or tab fails with a positioned parse error.

use serde::{Deserialize, Serialize};

use crate::store::{StoreOptions, DEFAULT_MAX_DISPATCH_ROUNDS, DEFAULT_SUBSCRIBER_CHANNEL_CAPACITY};
use crate::PreferencesState;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [preferences]
/// [store]
/// [logging]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Initial preference values for a new store.
    pub preferences: PreferencesState,
    /// Store tuning.
    pub store: StoreConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Store tuning from the `[store]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Cap on re-entrant changes accepted per cascade.
    pub max_dispatch_rounds: usize,
    /// Broadcast channel capacity for async subscribers.
    pub channel_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_dispatch_rounds: DEFAULT_MAX_DISPATCH_ROUNDS,
            channel_capacity: DEFAULT_SUBSCRIBER_CHANNEL_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Converts to the options accepted by `PreferencesStore::with_options`.
    pub fn to_options(&self) -> StoreOptions {
        StoreOptions {
            max_dispatch_rounds: self.max_dispatch_rounds,
            channel_capacity: self.channel_capacity,
        }
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log output settings from the `[logging]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Verbosity used when `DASHPREFS_LOG` is unset.
    pub log_level: LogLevel,
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings (default).
    #[default]
    Warn,
    /// Informational messages.
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
