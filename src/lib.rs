//! Dashboard preferences library
//!
//! This crate provides the display-preferences store for the finance
//! dashboard, together with the pieces around it: typed preference values,
//! the layout shell's transient view flags, TOML configuration for initial
//! values, and logging setup.
//!
//! # Overview
//!
//! - [`store::PreferencesStore`] holds the current [`PreferencesState`] and
//!   notifies observers when a field changes.
//! - Enumeration fields ([`TimeRange`], [`Density`], [`Theme`],
//!   [`DashboardTab`]) are closed types; text input is parsed with
//!   [`std::str::FromStr`] and rejected with
//!   [`PreferenceError::InvalidPreferenceValue`].
//! - [`layout::ShellLayout`] tracks sidebar state, which is owned by the shell
//!   and deliberately kept out of the store.

/// Configuration utilities including XDG path resolution.
pub mod config;

/// Layout shell view flags and navigation table.
pub mod layout;

/// Logging initialization.
pub mod logging;

/// Preferences store with observer notifications.
pub mod store;

/// Preference value types.
mod preferences;
pub use preferences::*;

#[cfg(test)]
mod tests;
