//! Tests for the PreferencesStore module.
//!
//! Tests are organized into categories:
//! - `basic`: Construction, defaults and snapshots
//! - `setters`: Single-field replacement and string input
//! - `observer`: Callback registration and notification
//! - `reentrant`: Setters called from inside observers
//! - `subscriber`: Broadcast channel and notifications
//! - `concurrent`: Access from multiple threads and tasks

mod reentrant;

use super::{ObserverId, PreferencesStore};
use crate::PreferencesUpdate;
use std::sync::{Arc, Mutex};

/// Shared log of updates seen by a recording observer.
pub(super) type UpdateLog = Arc<Mutex<Vec<PreferencesUpdate>>>;

/// Registers an observer that records every update it receives.
pub(super) fn record_updates(store: &PreferencesStore) -> (ObserverId, UpdateLog) {
    let log: UpdateLog = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    let id = store.observe(move |update| {
        sink.lock().unwrap_or_else(|e| e.into_inner()).push(update.clone());
    });
    (id, log)
}

/// Snapshot of a recorded log.
pub(super) fn recorded(log: &UpdateLog) -> Vec<PreferencesUpdate> {
    log.lock().unwrap_or_else(|e| e.into_inner()).clone()
}
