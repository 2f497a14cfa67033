//! Tests for setters called from inside observer callbacks.

use super::{record_updates, recorded, PreferencesStore};
use crate::store::StoreOptions;
use crate::{DashboardTab, Density, PreferenceChange, PreferencesState};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[test]
fn test_reentrant_setter_is_delivered_after_current_update() {
    let store = PreferencesStore::new();
    let handle = store.clone();
    store.observe(move |update| {
        if update.change == PreferenceChange::ActiveTab(DashboardTab::Cash) {
            handle.set_active_tab(DashboardTab::Invoices);
        }
    });
    let (_id, log) = record_updates(&store);

    assert!(store.set_active_tab(DashboardTab::Cash));

    let tabs: Vec<_> = recorded(&log).iter().map(|u| u.state.active_tab).collect();
    assert_eq!(tabs, vec![DashboardTab::Cash, DashboardTab::Invoices]);
    assert_eq!(store.get_state().active_tab, DashboardTab::Invoices);
    assert_eq!(store.revision(), 2);
}

#[test]
fn test_reentrant_setter_reports_change() {
    let store = PreferencesStore::new();
    let handle = store.clone();
    let inner_result = Arc::new(AtomicBool::new(false));
    let inner_result_cb = Arc::clone(&inner_result);
    store.observe(move |update| {
        if update.state.density == Density::Spacious {
            let changed = handle.set_density(Density::Cozy);
            inner_result_cb.store(changed, Ordering::SeqCst);
        }
    });

    store.set_density(Density::Spacious);

    assert!(inner_result.load(Ordering::SeqCst));
    assert_eq!(store.get_state().density, Density::Cozy);
}

#[test]
fn test_converging_observer_settles() {
    let store = PreferencesStore::new();
    let handle = store.clone();
    // Never allow the compact density while on the overview tab.
    store.observe(move |update| {
        if update.state.density == Density::Compact
            && update.state.active_tab == DashboardTab::Overview
        {
            handle.set_density(Density::Cozy);
        }
    });
    let (_id, log) = record_updates(&store);

    store.set_density(Density::Compact);

    let densities: Vec<_> = recorded(&log).iter().map(|u| u.state.density).collect();
    assert_eq!(densities, vec![Density::Compact, Density::Cozy]);
}

#[test]
fn test_feedback_loop_is_bounded() {
    let store = PreferencesStore::with_options(
        PreferencesState::default(),
        StoreOptions {
            max_dispatch_rounds: 8,
            ..StoreOptions::default()
        },
    );
    let handle = store.clone();
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_cb = Arc::clone(&calls);
    let looping = Arc::new(AtomicBool::new(true));
    let looping_cb = Arc::clone(&looping);
    let results = Arc::new(Mutex::new(Vec::new()));
    let results_cb = Arc::clone(&results);
    store.observe(move |update| {
        calls_cb.fetch_add(1, Ordering::SeqCst);
        if !looping_cb.load(Ordering::SeqCst) {
            return;
        }
        let next = match update.state.density {
            Density::Compact => Density::Spacious,
            _ => Density::Compact,
        };
        let changed = handle.set_density(next);
        results_cb.lock().unwrap_or_else(|e| e.into_inner()).push(changed);
    });

    store.set_density(Density::Compact);
    assert_eq!(
        calls.load(Ordering::SeqCst),
        9,
        "initial update plus 8 re-entrant rounds"
    );
    assert_eq!(store.revision(), 9);
    let results = results.lock().unwrap_or_else(|e| e.into_inner()).clone();
    assert_eq!(results.len(), 9);
    assert!(results[..8].iter().all(|changed| *changed));
    assert!(!results[8], "change past the cap is refused");

    // Dispatch is usable again once the loop has been cut.
    looping.store(false, Ordering::SeqCst);
    calls.store(0, Ordering::SeqCst);
    let (_id, log) = record_updates(&store);
    store.set_active_tab(DashboardTab::Fees);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(recorded(&log).len(), 1);
}

#[test]
fn test_observers_end_on_current_state_after_loop_is_cut() {
    let store = PreferencesStore::with_options(
        PreferencesState::default(),
        StoreOptions {
            max_dispatch_rounds: 8,
            ..StoreOptions::default()
        },
    );
    let handle = store.clone();
    store.observe(move |update| {
        let next = match update.state.density {
            Density::Compact => Density::Spacious,
            _ => Density::Compact,
        };
        handle.set_density(next);
    });
    let (_id, log) = record_updates(&store);

    store.set_density(Density::Compact);

    let updates = recorded(&log);
    let last = updates.last().expect("at least one update");
    assert_eq!(last.state, store.get_state());
    assert_eq!(last.revision, store.revision());
}

#[test]
fn test_loop_budget_is_per_cascade() {
    let store = PreferencesStore::with_options(
        PreferencesState::default(),
        StoreOptions {
            max_dispatch_rounds: 1,
            ..StoreOptions::default()
        },
    );
    let handle = store.clone();
    // Two independent one-step corrections in a row.
    store.observe(move |update| match update.change {
        PreferenceChange::ActiveTab(DashboardTab::Stocks) => {
            handle.set_active_tab(DashboardTab::Overview);
        }
        PreferenceChange::Density(Density::Compact) => {
            handle.set_density(Density::Cozy);
        }
        _ => {}
    });

    store.set_active_tab(DashboardTab::Stocks);
    store.set_density(Density::Compact);

    let state = store.get_state();
    assert_eq!(state.active_tab, DashboardTab::Overview);
    assert_eq!(state.density, Density::Cozy);
    assert_eq!(store.revision(), 4);
}

#[test]
fn test_reentrant_observe_during_dispatch() {
    let store = PreferencesStore::new();
    let handle = store.clone();
    let registered = Arc::new(AtomicBool::new(false));
    let registered_cb = Arc::clone(&registered);
    let late_calls = Arc::new(AtomicUsize::new(0));
    let late_calls_cb = Arc::clone(&late_calls);

    store.observe(move |_| {
        if !registered_cb.swap(true, Ordering::SeqCst) {
            let late_calls = Arc::clone(&late_calls_cb);
            handle.observe(move |_| {
                late_calls.fetch_add(1, Ordering::SeqCst);
            });
        }
    });

    store.set_density(Density::Compact);
    assert_eq!(
        late_calls.load(Ordering::SeqCst),
        0,
        "observer added mid-dispatch does not see the update in flight"
    );
    store.set_density(Density::Spacious);
    assert_eq!(late_calls.load(Ordering::SeqCst), 1);
}
