//! Tests for the preference value types.
//!
//! Tests are organized by domain:
//! - `parsing` - Text input, aliases and rejection messages
//! - `state` - Snapshot replacement semantics and labels
//! - `time_range` - Date windows derived from a time range
//! - `serialization` - Wire forms used by JSON and TOML
