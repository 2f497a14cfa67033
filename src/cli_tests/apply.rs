//! Assignment parsing and rendering tests for the preference commands.

use crate::commands::{parse_assignment, render_options, render_state, AssignmentError, OutputFormat};
use dashboard_prefs::{
    Currency, DashboardTab, Density, PreferenceChange, PreferenceError, PreferenceKey,
    PreferencesState,
};

#[test]
fn test_parse_assignment_typed_values() {
    assert_eq!(
        parse_assignment("density=compact").unwrap(),
        PreferenceChange::Density(Density::Compact)
    );
    assert_eq!(
        parse_assignment("activeTab=mutual").unwrap(),
        PreferenceChange::ActiveTab(DashboardTab::Mutual)
    );
    assert_eq!(
        parse_assignment("currency=USD").unwrap(),
        PreferenceChange::Currency(Currency::new("USD").unwrap())
    );
}

#[test]
fn test_parse_assignment_splits_on_first_equals() {
    let change = parse_assignment("currency=a=b").unwrap();
    assert_eq!(
        change,
        PreferenceChange::Currency(Currency::new("a=b").unwrap())
    );
}

#[test]
fn test_parse_assignment_missing_equals() {
    let err = parse_assignment("density").unwrap_err();
    assert!(matches!(err, AssignmentError::MissingEquals(ref s) if s == "density"));
}

#[test]
fn test_parse_assignment_unknown_key() {
    let err = parse_assignment("fontSize=12").unwrap_err();
    assert!(matches!(
        err,
        AssignmentError::Preference(PreferenceError::UnknownPreference(_))
    ));
}

#[test]
fn test_parse_assignment_invalid_value() {
    let err = parse_assignment("timeRange=2y").unwrap_err();
    match err {
        AssignmentError::Preference(PreferenceError::InvalidPreferenceValue { key, value, .. }) => {
            assert_eq!(key, PreferenceKey::TimeRange);
            assert_eq!(value, "2y");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_render_state_toml_uses_wire_values() {
    let text = render_state(&PreferencesState::default(), OutputFormat::Toml).unwrap();
    assert!(text.contains("time_range = \"3m\""));
    assert!(text.contains("currency = \"PKR\""));
    assert!(text.contains("active_tab = \"overview\""));
}

#[test]
fn test_render_state_json_is_parseable() {
    let text = render_state(&PreferencesState::default(), OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["density"], "cozy");
    assert_eq!(value["theme"], "dark");
}

#[test]
fn test_render_options_lists_every_key() {
    let text = render_options();
    assert_eq!(text.lines().count(), PreferenceKey::ALL.len());
    assert!(text.contains("1m, 3m, 6m, 1y, all"));
    assert!(text.contains("any non-empty code"));
    assert!(text.contains("(default: overview)"));
}
