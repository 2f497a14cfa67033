//! Command implementations for the dashprefs CLI.
//!
//! This module contains all command handler functions, organized by domain:
//! - `prefs` - Preference commands (show, options, apply)
//! - `config` - Configuration file commands (init, path, validate)

pub(crate) mod config;
pub(crate) mod prefs;

pub(crate) use config::*;
pub(crate) use prefs::*;

use clap::ValueEnum;
use dashboard_prefs::config::loader::ConfigLoader;
use dashboard_prefs::config::schema::{Config, LogLevel};
use dashboard_prefs::logging;
use std::path::Path;

/// Output format for preference snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// TOML, matching the `[preferences]` section of the config file.
    Toml,
    /// Pretty-printed JSON.
    Json,
}

/// Loads configuration and starts logging at the configured level.
///
/// On failure, logging starts at the default level, the error is printed,
/// and `None` is returned.
pub(crate) fn load_config(path: Option<&Path>) -> Option<Config> {
    match ConfigLoader::load(path) {
        Ok(config) => {
            logging::init(config.logging.log_level);
            Some(config)
        }
        Err(e) => {
            logging::init(LogLevel::default());
            eprintln!("Config error: {e}");
            None
        }
    }
}
