//! Pending-task record ↔ document mapping.

use chrono::DateTime;
use serde_json::Value;

use super::{string_field, timestamp_field, timestamp_value};
use crate::domain::{EntityKey, TaskRecord};
use crate::error::{Error, Result};
use crate::ports::Document;

/// Default HTTP method when a document carries none.
const DEFAULT_METHOD: &str = "POST";

#[derive(Debug, Clone, Copy, Default)]
pub struct TaskMapper;

impl TaskMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn to_document(&self, task: &TaskRecord) -> Document {
        let mut doc = Document::new(task.key().clone());
        doc.insert("relative_uri", Value::String(task.relative_uri().into()));
        doc.insert("method", Value::String(task.method().into()));
        doc.insert("payload", task.payload().clone());
        if let Some(schedule_time) = task.schedule_time() {
            doc.insert("schedule_time", timestamp_value(schedule_time));
        }
        doc.insert("created_at", timestamp_value(task.created_at()));
        doc
    }

    /// Map a document back to a record.
    ///
    /// `relative_uri` is required, but the deprecated `url` field name is
    /// accepted as an alias for documents written by older clients.
    pub fn to_record(&self, key: EntityKey, doc: &Document) -> Result<TaskRecord> {
        let relative_uri = string_field(doc, "relative_uri")
            .or_else(|| string_field(doc, "url"))
            .ok_or_else(|| Error::MalformedRecord {
                key: key.to_string(),
                field: "relative_uri",
            })?;
        let method = string_field(doc, "method").unwrap_or_else(|| DEFAULT_METHOD.to_string());
        let payload = doc.get("payload").cloned().unwrap_or(Value::Null);
        let schedule_time = timestamp_field(doc, "schedule_time");
        let created_at = timestamp_field(doc, "created_at").unwrap_or(DateTime::UNIX_EPOCH);

        Ok(TaskRecord::new(
            key,
            relative_uri,
            method,
            payload,
            schedule_time,
            created_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityKeyFactory;
    use chrono::{TimeZone, Utc};

    fn key() -> EntityKey {
        EntityKeyFactory::new()
            .build_from_pairs([("Task", "abc")])
            .unwrap()
    }

    fn sample_task() -> TaskRecord {
        TaskRecord::new(
            key(),
            "/work",
            "POST",
            serde_json::json!({"n": 1}),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()),
            Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn record_round_trips_through_document() {
        let mapper = TaskMapper::new();
        let task = sample_task();

        let doc = mapper.to_document(&task);
        let back = mapper.to_record(doc.key().clone(), &doc).unwrap();

        assert_eq!(back, task);
    }

    #[test]
    fn legacy_url_field_is_accepted() {
        let mapper = TaskMapper::new();
        let mut doc = Document::new(key());
        doc.insert("url", Value::String("/legacy".into()));

        let task = mapper.to_record(key(), &doc).unwrap();
        assert_eq!(task.relative_uri(), "/legacy");
    }

    #[test]
    fn relative_uri_wins_over_legacy_url() {
        let mapper = TaskMapper::new();
        let mut doc = Document::new(key());
        doc.insert("relative_uri", Value::String("/current".into()));
        doc.insert("url", Value::String("/legacy".into()));

        let task = mapper.to_record(key(), &doc).unwrap();
        assert_eq!(task.relative_uri(), "/current");
    }

    #[test]
    fn missing_uri_is_malformed() {
        let mapper = TaskMapper::new();
        let mut doc = Document::new(key());
        doc.insert("method", Value::String("GET".into()));

        let result = mapper.to_record(key(), &doc);
        assert!(matches!(
            result,
            Err(Error::MalformedRecord {
                field: "relative_uri",
                ..
            })
        ));
    }

    #[test]
    fn missing_optional_fields_get_defaults() {
        let mapper = TaskMapper::new();
        let mut doc = Document::new(key());
        doc.insert("relative_uri", Value::String("/work".into()));

        let task = mapper.to_record(key(), &doc).unwrap();
        assert_eq!(task.method(), "POST");
        assert_eq!(task.payload(), &Value::Null);
        assert_eq!(task.schedule_time(), None);
        assert_eq!(task.created_at(), DateTime::UNIX_EPOCH);
    }
}
