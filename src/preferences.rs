//! Preference value types shared by the store, configuration and CLI.
//!
//! Every enumeration field is a closed sum type, so an out-of-range value
//! cannot be handed to the store. Text input goes through [`FromStr`], which
//! reports [`PreferenceError::InvalidPreferenceValue`] for anything outside
//! the allowed set.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Joins the canonical forms of `values` for error messages.
fn expected_values<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Normalizes user text before matching it against canonical forms.
fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Errors raised when text cannot be turned into a preference value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferenceError {
    /// The value is not a member of the field's allowed set.
    #[error("Invalid value for {key}: '{value}' (expected one of: {expected})")]
    InvalidPreferenceValue {
        /// Field the value was meant for.
        key: PreferenceKey,
        /// The rejected input, verbatim.
        value: String,
        /// Human-readable list of accepted values.
        expected: String,
    },

    /// The preference name does not match any field.
    #[error("Unknown preference: {0}")]
    UnknownPreference(String),
}

// ---------------------------------------------------------------------------
// Time range
// ---------------------------------------------------------------------------

/// Reporting window applied to dashboard widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last month.
    #[serde(rename = "1m")]
    OneMonth,
    /// Last three months.
    #[default]
    #[serde(rename = "3m")]
    ThreeMonths,
    /// Last six months.
    #[serde(rename = "6m")]
    SixMonths,
    /// Last twelve months.
    #[serde(rename = "1y")]
    OneYear,
    /// No lower bound.
    #[serde(rename = "all")]
    All,
}

impl TimeRange {
    /// Every time range, shortest first.
    pub const ALL: [TimeRange; 5] = [
        TimeRange::OneMonth,
        TimeRange::ThreeMonths,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::All,
    ];

    /// Length of the window in months, or `None` for [`TimeRange::All`].
    pub fn months(self) -> Option<u32> {
        match self {
            TimeRange::OneMonth => Some(1),
            TimeRange::ThreeMonths => Some(3),
            TimeRange::SixMonths => Some(6),
            TimeRange::OneYear => Some(12),
            TimeRange::All => None,
        }
    }

    /// First date included in the window ending at `today`.
    ///
    /// Month arithmetic clamps to the end of shorter months, so a
    /// one-month range ending on March 31 starts on February 28 (or 29).
    /// Returns `None` for [`TimeRange::All`].
    pub fn start_date(self, today: NaiveDate) -> Option<NaiveDate> {
        let months = self.months()?;
        today.checked_sub_months(Months::new(months))
    }

    /// Returns `true` if `date` falls inside the window ending at `today`.
    pub fn includes(self, date: NaiveDate, today: NaiveDate) -> bool {
        if date > today {
            return false;
        }
        match self.start_date(today) {
            Some(start) => date >= start,
            None => true,
        }
    }

    /// Label shown in the range picker.
    pub fn label(self) -> &'static str {
        match self {
            TimeRange::OneMonth => "1 month",
            TimeRange::ThreeMonths => "3 months",
            TimeRange::SixMonths => "6 months",
            TimeRange::OneYear => "1 year",
            TimeRange::All => "All time",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimeRange::OneMonth => "1m",
            TimeRange::ThreeMonths => "3m",
            TimeRange::SixMonths => "6m",
            TimeRange::OneYear => "1y",
            TimeRange::All => "all",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TimeRange {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "1m" | "1month" => Ok(TimeRange::OneMonth),
            "3m" | "3months" => Ok(TimeRange::ThreeMonths),
            "6m" | "6months" => Ok(TimeRange::SixMonths),
            "1y" | "1year" | "12m" => Ok(TimeRange::OneYear),
            "all" => Ok(TimeRange::All),
            _ => Err(PreferenceError::InvalidPreferenceValue {
                key: PreferenceKey::TimeRange,
                value: s.to_string(),
                expected: expected_values(&TimeRange::ALL),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Display currency code.
///
/// Free-form: codes are not checked against ISO 4217. The only rule is that
/// the value is never blank, which keeps the "one value per field" invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Currency(String);

impl Currency {
    /// Builds a currency from `code`, trimming surrounding whitespace.
    pub fn new(code: impl Into<String>) -> Result<Self, PreferenceError> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(PreferenceError::InvalidPreferenceValue {
                key: PreferenceKey::Currency,
                value: code,
                expected: "a non-empty currency code".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The currency code as text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self("PKR".to_string())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Currency {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::new(s)
    }
}

impl TryFrom<String> for Currency {
    type Error = PreferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Currency::new(value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.0
    }
}

// ---------------------------------------------------------------------------
// Density
// ---------------------------------------------------------------------------

/// Row spacing used by tables and cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// Tight spacing.
    Compact,
    /// Balanced spacing (default).
    #[default]
    Cozy,
    /// Generous spacing.
    Spacious,
}

impl Density {
    /// Every density, tightest first.
    pub const ALL: [Density; 3] = [Density::Compact, Density::Cozy, Density::Spacious];

    /// Label shown in the density picker.
    pub fn label(self) -> &'static str {
        match self {
            Density::Compact => "Compact",
            Density::Cozy => "Cozy",
            Density::Spacious => "Spacious",
        }
    }
}

impl fmt::Display for Density {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Density::Compact => "compact",
            Density::Cozy => "cozy",
            Density::Spacious => "spacious",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Density {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "compact" => Ok(Density::Compact),
            "cozy" => Ok(Density::Cozy),
            "spacious" => Ok(Density::Spacious),
            _ => Err(PreferenceError::InvalidPreferenceValue {
                key: PreferenceKey::Density,
                value: s.to_string(),
                expected: expected_values(&Density::ALL),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// Color theme. Only the dark theme ships today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark slate palette.
    #[default]
    Dark,
}

impl Theme {
    /// Every theme.
    pub const ALL: [Theme; 1] = [Theme::Dark];

    /// Label shown in the theme picker.
    pub fn label(self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "dark" => Ok(Theme::Dark),
            _ => Err(PreferenceError::InvalidPreferenceValue {
                key: PreferenceKey::Theme,
                value: s.to_string(),
                expected: expected_values(&Theme::ALL),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard tab
// ---------------------------------------------------------------------------

/// Tab selected on the overview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTab {
    /// Summary cards and charts (default).
    #[default]
    Overview,
    /// Cash account balance and history.
    Cash,
    /// Recurring payments.
    Recurring,
    /// Issued invoices.
    Invoices,
    /// Stock portfolio.
    Stocks,
    /// Mutual fund holdings.
    #[serde(alias = "mutual-funds", alias = "mutual_funds")]
    Mutual,
    /// Trading fees.
    Fees,
    /// Transaction ledger.
    Transactions,
}

impl DashboardTab {
    /// Every tab, in display order.
    pub const ALL: [DashboardTab; 8] = [
        DashboardTab::Overview,
        DashboardTab::Cash,
        DashboardTab::Recurring,
        DashboardTab::Invoices,
        DashboardTab::Stocks,
        DashboardTab::Mutual,
        DashboardTab::Fees,
        DashboardTab::Transactions,
    ];

    /// Label shown on the tab strip.
    pub fn label(self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Cash => "Cash",
            DashboardTab::Recurring => "Recurring",
            DashboardTab::Invoices => "Invoices",
            DashboardTab::Stocks => "Stocks",
            DashboardTab::Mutual => "Mutual Funds",
            DashboardTab::Fees => "Fees",
            DashboardTab::Transactions => "Transactions",
        }
    }
}

impl fmt::Display for DashboardTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DashboardTab::Overview => "overview",
            DashboardTab::Cash => "cash",
            DashboardTab::Recurring => "recurring",
            DashboardTab::Invoices => "invoices",
            DashboardTab::Stocks => "stocks",
            DashboardTab::Mutual => "mutual",
            DashboardTab::Fees => "fees",
            DashboardTab::Transactions => "transactions",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DashboardTab {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "overview" => Ok(DashboardTab::Overview),
            "cash" => Ok(DashboardTab::Cash),
            "recurring" => Ok(DashboardTab::Recurring),
            "invoices" => Ok(DashboardTab::Invoices),
            "stocks" => Ok(DashboardTab::Stocks),
            "mutual" | "mutual-funds" | "mutual_funds" => Ok(DashboardTab::Mutual),
            "fees" => Ok(DashboardTab::Fees),
            "transactions" => Ok(DashboardTab::Transactions),
            _ => Err(PreferenceError::InvalidPreferenceValue {
                key: PreferenceKey::ActiveTab,
                value: s.to_string(),
                expected: expected_values(&DashboardTab::ALL),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// State, keys and changes
// ---------------------------------------------------------------------------

/// Snapshot of every dashboard display preference.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesState {
    /// Reporting window.
    pub time_range: TimeRange,
    /// Display currency.
    pub currency: Currency,
    /// Row spacing.
    pub density: Density,
    /// Color theme.
    pub theme: Theme,
    /// Selected overview tab.
    pub active_tab: DashboardTab,
}

impl PreferencesState {
    /// Replaces the field named by `change`.
    ///
    /// Returns `false` without touching anything when the field already holds
    /// the new value.
    pub fn apply(&mut self, change: &PreferenceChange) -> bool {
        fn replace<T: PartialEq + Clone>(slot: &mut T, value: &T) -> bool {
            if slot == value {
                return false;
            }
            *slot = value.clone();
            true
        }

        match change {
            PreferenceChange::TimeRange(v) => replace(&mut self.time_range, v),
            PreferenceChange::Currency(v) => replace(&mut self.currency, v),
            PreferenceChange::Density(v) => replace(&mut self.density, v),
            PreferenceChange::Theme(v) => replace(&mut self.theme, v),
            PreferenceChange::ActiveTab(v) => replace(&mut self.active_tab, v),
        }
    }

    /// Canonical text of the field named by `key`.
    pub fn value_of(&self, key: PreferenceKey) -> String {
        match key {
            PreferenceKey::TimeRange => self.time_range.to_string(),
            PreferenceKey::Currency => self.currency.to_string(),
            PreferenceKey::Density => self.density.to_string(),
            PreferenceKey::Theme => self.theme.to_string(),
            PreferenceKey::ActiveTab => self.active_tab.to_string(),
        }
    }
}

/// Names one field of [`PreferencesState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceKey {
    /// `time_range`
    TimeRange,
    /// `currency`
    Currency,
    /// `density`
    Density,
    /// `theme`
    Theme,
    /// `active_tab`
    ActiveTab,
}

impl PreferenceKey {
    /// Every key, in field order.
    pub const ALL: [PreferenceKey; 5] = [
        PreferenceKey::TimeRange,
        PreferenceKey::Currency,
        PreferenceKey::Density,
        PreferenceKey::Theme,
        PreferenceKey::ActiveTab,
    ];

    /// Canonical values accepted for this key, or `None` for free-form fields.
    pub fn allowed_values(self) -> Option<Vec<String>> {
        fn all<T: fmt::Display>(values: &[T]) -> Option<Vec<String>> {
            Some(values.iter().map(|v| v.to_string()).collect())
        }

        match self {
            PreferenceKey::TimeRange => all(&TimeRange::ALL),
            PreferenceKey::Currency => None,
            PreferenceKey::Density => all(&Density::ALL),
            PreferenceKey::Theme => all(&Theme::ALL),
            PreferenceKey::ActiveTab => all(&DashboardTab::ALL),
        }
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PreferenceKey::TimeRange => "time_range",
            PreferenceKey::Currency => "currency",
            PreferenceKey::Density => "density",
            PreferenceKey::Theme => "theme",
            PreferenceKey::ActiveTab => "active_tab",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for PreferenceKey {
    type Err = PreferenceError;

    /// Accepts snake_case, kebab-case and camelCase spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = normalize(s)
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect();
        match folded.as_str() {
            "timerange" => Ok(PreferenceKey::TimeRange),
            "currency" => Ok(PreferenceKey::Currency),
            "density" => Ok(PreferenceKey::Density),
            "theme" => Ok(PreferenceKey::Theme),
            "activetab" | "tab" => Ok(PreferenceKey::ActiveTab),
            _ => Err(PreferenceError::UnknownPreference(s.to_string())),
        }
    }
}

/// Replacement of exactly one preference field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum PreferenceChange {
    /// New reporting window.
    TimeRange(TimeRange),
    /// New display currency.
    Currency(Currency),
    /// New row spacing.
    Density(Density),
    /// New color theme.
    Theme(Theme),
    /// New overview tab.
    ActiveTab(DashboardTab),
}

impl PreferenceChange {
    /// Parses `value` as the type of the field named by `key`.
    pub fn parse(key: PreferenceKey, value: &str) -> Result<Self, PreferenceError> {
        Ok(match key {
            PreferenceKey::TimeRange => PreferenceChange::TimeRange(value.parse()?),
            PreferenceKey::Currency => PreferenceChange::Currency(value.parse()?),
            PreferenceKey::Density => PreferenceChange::Density(value.parse()?),
            PreferenceKey::Theme => PreferenceChange::Theme(value.parse()?),
            PreferenceKey::ActiveTab => PreferenceChange::ActiveTab(value.parse()?),
        })
    }

    /// Field this change replaces.
    pub fn key(&self) -> PreferenceKey {
        match self {
            PreferenceChange::TimeRange(_) => PreferenceKey::TimeRange,
            PreferenceChange::Currency(_) => PreferenceKey::Currency,
            PreferenceChange::Density(_) => PreferenceKey::Density,
            PreferenceChange::Theme(_) => PreferenceKey::Theme,
            PreferenceChange::ActiveTab(_) => PreferenceKey::ActiveTab,
        }
    }
}

impl fmt::Display for PreferenceChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            PreferenceChange::TimeRange(v) => v.to_string(),
            PreferenceChange::Currency(v) => v.to_string(),
            PreferenceChange::Density(v) => v.to_string(),
            PreferenceChange::Theme(v) => v.to_string(),
            PreferenceChange::ActiveTab(v) => v.to_string(),
        };
        write!(f, "{}={}", self.key(), value)
    }
}

/// Notification delivered to observers and broadcast subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    /// Store revision after this change. The initial state is revision 0.
    pub revision: u64,
    /// The field replacement that produced this revision.
    pub change: PreferenceChange,
    /// Full snapshot immediately after the change.
    pub state: PreferencesState,
}
