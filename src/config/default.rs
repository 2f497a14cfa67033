//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()`
//! and functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Dashboard Preferences Configuration
#
# This file was auto-generated with default values.
# Values in [preferences] seed the store when the dashboard starts. Changes
# made at runtime are not written back here.
#
# Location: $XDG_CONFIG_HOME/dashboard-prefs/config.toml

# ==============================================================================
# Initial preferences
# ==============================================================================

[preferences]

# Reporting window applied to widgets.
# Options: "1m", "3m", "6m", "1y", "all"
time_range = "3m"

# Display currency code. Any non-empty text is accepted.
currency = "PKR"

# Row spacing for tables and cards.
# Options: "compact", "cozy", "spacious"
density = "cozy"

# Color theme.
# Options: "dark"
theme = "dark"

# Tab selected on the overview page.
# Options: "overview", "cash", "recurring", "invoices", "stocks", "mutual",
#          "fees", "transactions"
active_tab = "overview"

# ==============================================================================
# Store tuning
# ==============================================================================

[store]

# Maximum changes observers may make from inside their callbacks in
# response to one outside change. Further changes are refused. Bounds
# feedback loops.
max_dispatch_rounds = 32

# Capacity of the broadcast channel used by async subscribers.
# Subscribers that fall further behind than this miss updates.
channel_capacity = 256

# ==============================================================================
# Logging
# ==============================================================================

[logging]

# Verbosity when DASHPREFS_LOG is not set.
# Options: "error", "warn", "info", "debug", "trace"
log_level = "warn"
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates the default config file if it does not already exist.
///
/// Returns `Ok(true)` if the file was created, `Ok(false)` if it already exists.
pub fn create_default_config_if_missing() -> Result<bool, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        return Ok(false);
    }

    write_default_config(&path)?;
    tracing::info!("Created default configuration at {}", path.display());
    Ok(true)
}

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();

    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists { path });
        }
        let backup_path = xdg::backup_path(&path);
        fs::rename(&path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(&path)?;
    Ok(path)
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    xdg::ensure_config_dir().map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
