//! Preferences store for the dashboard.
//!
//! This module provides the in-memory holder of dashboard display settings.
//! The store is an explicitly constructed handle: clones share the same
//! state, observers and broadcast channel, so consumers receive a clone
//! instead of reaching for a global.
//!
//! Every effective change is delivered two ways:
//! - synchronously to callback observers registered with
//!   [`PreferencesStore::observe`], in registration order;
//! - to [`PreferencesStore::subscribe`] receivers over a tokio broadcast
//!   channel, for async consumers.

use crate::{
    Currency, DashboardTab, Density, PreferenceChange, PreferenceError, PreferenceKey,
    PreferencesState, PreferencesUpdate, Theme, TimeRange,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, ThreadId};
use tokio::sync::broadcast;

#[cfg(test)]
mod tests;

mod observers;

pub use observers::ObserverId;
use observers::{InFlight, Observer, Pending};

/// Default capacity for the broadcast notification channel.
/// This allows for bursty update scenarios without dropping notifications.
pub const DEFAULT_SUBSCRIBER_CHANNEL_CAPACITY: usize = 256;

/// Default cap on re-entrant changes accepted per cascade.
///
/// A cascade is one update from outside the observers plus every change
/// observer callbacks make in response to it, directly or transitively. This
/// bounds observer feedback loops.
pub const DEFAULT_MAX_DISPATCH_ROUNDS: usize = 32;

/// Tuning knobs for a [`PreferencesStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Maximum re-entrant changes accepted per cascade. Values below 1 are
    /// treated as 1.
    pub max_dispatch_rounds: usize,
    /// Broadcast channel capacity. Values below 1 are treated as 1.
    pub channel_capacity: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            max_dispatch_rounds: DEFAULT_MAX_DISPATCH_ROUNDS,
            channel_capacity: DEFAULT_SUBSCRIBER_CHANNEL_CAPACITY,
        }
    }
}

/// Shared, mutable part of the store.
struct StoreInner {
    /// Current preference values.
    state: PreferencesState,
    /// Count of effective changes since construction.
    revision: u64,
    /// Callback observers in registration order.
    observers: Vec<(ObserverId, Observer)>,
    /// Next id handed out by `observe`.
    next_observer_id: u64,
    /// Updates waiting to be delivered to observers.
    pending: VecDeque<Pending>,
    /// Thread currently draining `pending`, if any.
    dispatcher: Option<ThreadId>,
    /// Update whose observers are running right now.
    in_flight: Option<InFlight>,
    /// Highest revision whose observers have all been called.
    delivered: u64,
    /// Re-entrant changes accepted so far, by cascade root revision.
    cascades: HashMap<u64, usize>,
}

/// Thread-safe preferences store.
///
/// Reads return a snapshot clone. Each setter replaces exactly one field and,
/// if the value actually changed, notifies observers before returning.
/// Setting a field to its current value is a no-op.
///
/// # Example
///
/// ```
/// use dashboard_prefs::store::PreferencesStore;
/// use dashboard_prefs::Density;
///
/// let store = PreferencesStore::new();
/// let id = store.observe(|update| println!("changed: {}", update.change));
///
/// assert!(store.set_density(Density::Spacious));
/// assert_eq!(store.get_state().density, Density::Spacious);
///
/// store.unobserve(id);
/// ```
#[derive(Clone)]
pub struct PreferencesStore {
    /// State, observer registry and dispatch queue behind one lock.
    inner: Arc<Mutex<StoreInner>>,
    /// Signalled whenever `delivered` advances or the dispatcher slot frees.
    delivered_cv: Arc<Condvar>,
    /// Broadcast channel sender for async subscribers.
    update_tx: broadcast::Sender<PreferencesUpdate>,
    /// Per-cascade cap on re-entrant changes.
    max_dispatch_rounds: usize,
}

impl std::fmt::Debug for PreferencesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("PreferencesStore")
            .field("state", &inner.state)
            .field("revision", &inner.revision)
            .field("observer_count", &inner.observers.len())
            .field("subscriber_count", &self.update_tx.receiver_count())
            .finish()
    }
}

impl Default for PreferencesStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferencesStore {
    /// Creates a store holding the default preferences.
    pub fn new() -> Self {
        Self::with_state(PreferencesState::default())
    }

    /// Creates a store seeded with `state` and default options.
    pub fn with_state(state: PreferencesState) -> Self {
        Self::with_options(state, StoreOptions::default())
    }

    /// Creates a store seeded with `state`, using the given options.
    pub fn with_options(state: PreferencesState, options: StoreOptions) -> Self {
        let (update_tx, _rx) = broadcast::channel(options.channel_capacity.max(1));
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                state,
                revision: 0,
                observers: Vec::new(),
                next_observer_id: 0,
                pending: VecDeque::new(),
                dispatcher: None,
                in_flight: None,
                delivered: 0,
                cascades: HashMap::new(),
            })),
            delivered_cv: Arc::new(Condvar::new()),
            update_tx,
            max_dispatch_rounds: options.max_dispatch_rounds.max(1),
        }
    }

    /// Locks the shared state.
    ///
    /// A panic inside the lock cannot leave a field half-written (every
    /// mutation is a single assignment), so a poisoned lock is recovered.
    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a snapshot of the current preferences.
    pub fn get_state(&self) -> PreferencesState {
        self.lock().state.clone()
    }

    /// Returns the number of effective changes applied so far.
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    /// Subscribes to preference updates over a broadcast channel.
    ///
    /// Updates are sent while the state lock is held, so every receiver sees
    /// them in the order the changes were applied. A receiver that falls more
    /// than the channel capacity behind gets `RecvError::Lagged`.
    pub fn subscribe(&self) -> broadcast::Receiver<PreferencesUpdate> {
        self.update_tx.subscribe()
    }

    /// Returns the number of live broadcast receivers.
    pub fn subscriber_count(&self) -> usize {
        self.update_tx.receiver_count()
    }

    /// Applies a single-field replacement.
    ///
    /// Returns `true` if the field changed. On change, the revision is bumped,
    /// the update is broadcast, and observers are notified before this
    /// returns.
    ///
    /// Called from inside an observer callback, the update is queued instead
    /// and delivered right after the updates ahead of it, once the current
    /// callbacks return. Such re-entrant calls are limited to
    /// `max_dispatch_rounds` changes per cascade; past that the change is
    /// refused and `false` is returned, so observers never fall behind the
    /// state. Called from another thread while a dispatch is running, this
    /// blocks until that dispatch has delivered the update. Observers must
    /// therefore not wait on a thread that calls a setter.
    pub fn apply(&self, change: PreferenceChange) -> bool {
        let current = thread::current().id();
        let mut inner = self.lock();
        let reentrant = inner.dispatcher == Some(current);
        let cascade = if reentrant {
            inner.in_flight.map(|flight| flight.root)
        } else {
            None
        };

        if let Some(root) = cascade {
            let rounds = inner.cascades.get(&root).copied().unwrap_or(0);
            if rounds >= self.max_dispatch_rounds {
                if inner.state.clone().apply(&change) {
                    tracing::warn!(
                        "Observer feedback loop exceeded {} rounds, refused {} (revision {})",
                        self.max_dispatch_rounds,
                        change,
                        inner.revision
                    );
                }
                return false;
            }
        }

        if !inner.state.apply(&change) {
            tracing::trace!("Preference {} unchanged, skipping notification", change);
            return false;
        }
        if let Some(root) = cascade {
            *inner.cascades.entry(root).or_insert(0) += 1;
        }

        inner.revision += 1;
        let revision = inner.revision;
        let update = PreferencesUpdate {
            revision,
            change,
            state: inner.state.clone(),
        };
        tracing::debug!(revision, "Preference changed: {}", update.change);

        match self.update_tx.send(update.clone()) {
            Ok(count) => {
                tracing::trace!("Broadcast update sent to {} subscribers", count);
            }
            Err(_) => {
                tracing::trace!("No subscribers for preference update broadcast");
            }
        }

        inner.pending.push_back(Pending {
            update,
            root: cascade.unwrap_or(revision),
        });
        if reentrant {
            tracing::trace!("Dispatch in progress, queued revision {}", revision);
            return true;
        }

        self.deliver_through(inner, revision);
        true
    }

    /// Parses `value` for the field named by `key` and applies it.
    ///
    /// This is the boundary for untrusted text. On error the state is left
    /// unchanged and nobody is notified.
    pub fn set_from_str(&self, key: PreferenceKey, value: &str) -> Result<bool, PreferenceError> {
        let change = PreferenceChange::parse(key, value).map_err(|e| {
            tracing::debug!("Rejected preference input: {}", e);
            e
        })?;
        Ok(self.apply(change))
    }

    /// Replaces the reporting window.
    pub fn set_time_range(&self, value: TimeRange) -> bool {
        self.apply(PreferenceChange::TimeRange(value))
    }

    /// Replaces the display currency.
    pub fn set_currency(&self, value: Currency) -> bool {
        self.apply(PreferenceChange::Currency(value))
    }

    /// Replaces the row spacing.
    pub fn set_density(&self, value: Density) -> bool {
        self.apply(PreferenceChange::Density(value))
    }

    /// Replaces the color theme.
    pub fn set_theme(&self, value: Theme) -> bool {
        self.apply(PreferenceChange::Theme(value))
    }

    /// Replaces the selected overview tab.
    pub fn set_active_tab(&self, value: DashboardTab) -> bool {
        self.apply(PreferenceChange::ActiveTab(value))
    }
}
