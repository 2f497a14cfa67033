//! Preference command implementations.
//!
//! Handles commands that read or change preferences:
//! - `show` - Print the initial snapshot resolved from configuration
//! - `options` - List every preference with its allowed values
//! - `apply` - Apply assignments to a fresh store and print the result

use super::{load_config, OutputFormat};
use dashboard_prefs::store::PreferencesStore;
use dashboard_prefs::{PreferenceChange, PreferenceError, PreferenceKey, PreferencesState};
use std::path::Path;
use std::process::ExitCode;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Errors from parsing a `KEY=VALUE` argument.
#[derive(Debug, thiserror::Error)]
pub(crate) enum AssignmentError {
    /// The argument has no `=`.
    #[error("Expected KEY=VALUE, got '{0}'")]
    MissingEquals(String),

    /// The key or value was rejected.
    #[error(transparent)]
    Preference(#[from] PreferenceError),
}

/// Parses one `KEY=VALUE` argument into a change.
pub(crate) fn parse_assignment(arg: &str) -> Result<PreferenceChange, AssignmentError> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| AssignmentError::MissingEquals(arg.to_string()))?;
    let key: PreferenceKey = key.parse()?;
    Ok(PreferenceChange::parse(key, value)?)
}

/// Serializes a snapshot in the requested format.
pub(crate) fn render_state(
    state: &PreferencesState,
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Toml => toml::to_string(state)?,
        OutputFormat::Json => serde_json::to_string_pretty(state)? + "\n",
    })
}

/// Renders the allowed values table printed by `options`.
pub(crate) fn render_options() -> String {
    let defaults = PreferencesState::default();
    let mut out = String::new();
    for key in PreferenceKey::ALL {
        let allowed = key
            .allowed_values()
            .map(|values| values.join(", "))
            .unwrap_or_else(|| "any non-empty code".to_string());
        out.push_str(&format!(
            "{:<12} {:<58} (default: {})\n",
            key.to_string(),
            allowed,
            defaults.value_of(key)
        ));
    }
    out
}

fn print_state(state: &PreferencesState, format: OutputFormat) -> ExitCode {
    match render_state(state, format) {
        Ok(text) => {
            print!("{text}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: failed to render preferences: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints the initial preferences a new store would hold.
pub(crate) fn run_show_command(config_path: Option<&Path>, format: OutputFormat) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };
    print_state(&config.preferences, format)
}

/// Prints every preference with its allowed values and default.
pub(crate) fn run_options_command() -> ExitCode {
    print!("{}", render_options());
    ExitCode::SUCCESS
}

/// Builds a store from configuration, applies `assignments` in order, and
/// prints the final snapshot.
///
/// Every assignment is parsed before any is applied, so one bad argument
/// rejects the whole run. The notification count goes to stderr to keep
/// stdout a clean snapshot.
pub(crate) fn run_apply_command(
    config_path: Option<&Path>,
    format: OutputFormat,
    assignments: &[String],
) -> ExitCode {
    let Some(config) = load_config(config_path) else {
        return ExitCode::FAILURE;
    };

    let changes = match assignments
        .iter()
        .map(|arg| parse_assignment(arg))
        .collect::<Result<Vec<_>, _>>()
    {
        Ok(changes) => changes,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let store = PreferencesStore::with_options(config.preferences, config.store.to_options());
    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    store.observe(move |update| {
        counter.fetch_add(1, Ordering::SeqCst);
        tracing::info!(revision = update.revision, "Applied {}", update.change);
    });

    for change in changes {
        if !store.apply(change.clone()) {
            tracing::info!("Skipped {} (already set)", change);
        }
    }

    eprintln!(
        "{} assignment(s), {} notification(s)",
        assignments.len(),
        notifications.load(Ordering::SeqCst)
    );
    print_state(&store.get_state(), format)
}
