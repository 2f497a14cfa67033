//! Observer registration and synchronous dispatch for the PreferencesStore.
//!
//! Observers are plain callbacks. They run outside the state lock, so a
//! callback may read the store, register or remove observers, or call a
//! setter. A setter called from a callback only queues its update; the
//! dispatch loop already running delivers it next. A setter on another
//! thread waits for the running dispatch to deliver its update.

use super::{PreferencesStore, StoreInner};
use crate::PreferencesUpdate;
use std::sync::{Arc, MutexGuard, PoisonError};
use std::thread;

/// Callback invoked with each update.
pub(super) type Observer = Arc<dyn Fn(&PreferencesUpdate) + Send + Sync>;

/// Handle returned by [`PreferencesStore::observe`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// An update waiting in the dispatch queue.
pub(super) struct Pending {
    /// The update to deliver.
    pub(super) update: PreferencesUpdate,
    /// Revision of the update that started this cascade.
    pub(super) root: u64,
}

/// The update whose observers are currently running.
#[derive(Debug, Clone, Copy)]
pub(super) struct InFlight {
    pub(super) revision: u64,
    pub(super) root: u64,
}

/// Releases the dispatcher slot if an observer panics mid-drain.
///
/// The update being delivered counts as delivered. Anything still queued is
/// kept: a blocked setter picks up the drain, or the next dispatch delivers
/// it ahead of its own update.
struct PanicGuard<'a> {
    store: &'a PreferencesStore,
}

impl Drop for PanicGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut inner = self.store.lock();
            if let Some(flight) = inner.in_flight.take() {
                inner.delivered = flight.revision;
            }
            inner.dispatcher = None;
            inner.cascades.clear();
            tracing::warn!(
                "Observer panicked, {} notifications left queued",
                inner.pending.len()
            );
            self.store.delivered_cv.notify_all();
        }
    }
}

impl PreferencesStore {
    /// Registers `observer` to be called after every effective change.
    ///
    /// Observers are called in registration order with the update that
    /// describes the change and the snapshot right after it.
    pub fn observe<F>(&self, observer: F) -> ObserverId
    where
        F: Fn(&PreferencesUpdate) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        let id = ObserverId(inner.next_observer_id);
        inner.next_observer_id += 1;
        inner.observers.push((id, Arc::new(observer)));
        tracing::trace!("Registered observer {:?} ({} total)", id, inner.observers.len());
        id
    }

    /// Removes a previously registered observer.
    ///
    /// Returns `false` if `id` is unknown or was already removed. An observer
    /// removed from inside a callback may still receive the update being
    /// delivered at that moment.
    pub fn unobserve(&self, id: ObserverId) -> bool {
        let mut inner = self.lock();
        let before = inner.observers.len();
        inner.observers.retain(|(observer_id, _)| *observer_id != id);
        let removed = inner.observers.len() != before;
        if removed {
            tracing::trace!("Removed observer {:?}", id);
        }
        removed
    }

    /// Returns the number of registered callback observers.
    pub fn observer_count(&self) -> usize {
        self.lock().observers.len()
    }

    /// Blocks until `revision` has been delivered, draining the queue
    /// itself whenever no other thread is.
    pub(super) fn deliver_through<'a>(&'a self, mut inner: MutexGuard<'a, StoreInner>, revision: u64) {
        let current = thread::current().id();
        loop {
            if inner.delivered >= revision {
                return;
            }
            if inner.dispatcher.is_none() {
                inner.dispatcher = Some(current);
                drop(inner);
                self.dispatch_pending();
                inner = self.lock();
                continue;
            }
            tracing::trace!("Dispatch in progress, waiting for revision {}", revision);
            inner = self
                .delivered_cv
                .wait(inner)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Drains the pending queue, delivering each update to a snapshot of the
    /// observer list.
    ///
    /// The caller must have claimed the dispatcher slot before calling.
    fn dispatch_pending(&self) {
        let _guard = PanicGuard { store: self };

        loop {
            let (update, observers) = {
                let mut inner = self.lock();
                if let Some(flight) = inner.in_flight.take() {
                    inner.delivered = flight.revision;
                    self.delivered_cv.notify_all();
                }
                let Some(next) = inner.pending.pop_front() else {
                    inner.dispatcher = None;
                    inner.cascades.clear();
                    return;
                };
                inner.in_flight = Some(InFlight {
                    revision: next.update.revision,
                    root: next.root,
                });
                let observers: Vec<Observer> = inner
                    .observers
                    .iter()
                    .map(|(_, observer)| Arc::clone(observer))
                    .collect();
                (next.update, observers)
            };

            for observer in &observers {
                observer(&update);
            }
        }
    }
}
