//! Mappers: record ↔ document translation.
//!
//! Stateless and deterministic. Reads tolerate missing optional fields with
//! defined defaults; a missing required field is a
//! [`crate::error::Error::MalformedRecord`].

pub mod task;
pub mod task_process;

pub use task::TaskMapper;
pub use task_process::TaskProcessMapper;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::ports::Document;

/// A present, non-null string field.
pub(crate) fn string_field(doc: &Document, name: &str) -> Option<String> {
    match doc.get(name) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// Timestamps are stored as RFC 3339 strings.
pub(crate) fn timestamp_value(instant: DateTime<Utc>) -> Value {
    Value::String(instant.to_rfc3339())
}

/// A present, parseable timestamp field. Unparseable or missing values read
/// as `None`.
pub(crate) fn timestamp_field(doc: &Document, name: &str) -> Option<DateTime<Utc>> {
    string_field(doc, name)
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}
