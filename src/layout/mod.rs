//! Layout shell for the dashboard.
//!
//! Holds the sidebar's transient view flags and the navigation table. These
//! belong to the shell, not to the preferences store: they reset on every
//! page load and nothing observes them.

mod navigation;
mod shell;

pub use navigation::{nav_item_for_path, NavItem, NAV_ITEMS};
pub use shell::{ShellLayout, COLLAPSED_SIDEBAR_WIDTH_PX, EXPANDED_SIDEBAR_WIDTH_PX};
