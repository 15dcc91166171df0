//! Task-process record ↔ document mapping.

use chrono::DateTime;
use serde_json::Value;

use super::{string_field, timestamp_field, timestamp_value};
use crate::domain::{EntityKey, TaskProcessRecord};
use crate::error::{Error, Result};
use crate::ports::Document;

#[derive(Debug, Clone, Copy, Default)]
pub struct TaskProcessMapper;

impl TaskProcessMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn to_document(&self, process: &TaskProcessRecord) -> Document {
        let mut doc = Document::new(process.key().clone());
        doc.insert("relative_uri", Value::String(process.relative_uri().into()));
        doc.insert("method", Value::String(process.method().into()));
        doc.insert("payload", process.payload().clone());
        if let Some(schedule_time) = process.schedule_time() {
            doc.insert("schedule_time", timestamp_value(schedule_time));
        }
        doc.insert("created_at", timestamp_value(process.created_at()));
        doc
    }

    pub fn to_record(&self, key: EntityKey, doc: &Document) -> Result<TaskProcessRecord> {
        let relative_uri = string_field(doc, "relative_uri")
            .or_else(|| string_field(doc, "url"))
            .ok_or_else(|| Error::MalformedRecord {
                key: key.to_string(),
                field: "relative_uri",
            })?;
        let method = string_field(doc, "method").unwrap_or_else(|| "POST".to_string());
        let payload = doc.get("payload").cloned().unwrap_or(Value::Null);
        let schedule_time = timestamp_field(doc, "schedule_time");
        let created_at = timestamp_field(doc, "created_at").unwrap_or(DateTime::UNIX_EPOCH);

        Ok(TaskProcessRecord::new(
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
            .build_from_pairs([("TaskProcess", "abc")])
            .unwrap()
    }

    #[test]
    fn record_round_trips_through_document() {
        let mapper = TaskProcessMapper::new();
        let process = TaskProcessRecord::new(
            key(),
            "/work",
            "PUT",
            serde_json::json!([1, 2, 3]),
            None,
            Utc.with_ymd_and_hms(2024, 5, 2, 8, 30, 0).unwrap(),
        );

        let doc = mapper.to_document(&process);
        let back = mapper.to_record(doc.key().clone(), &doc).unwrap();

        assert_eq!(back, process);
    }

    #[test]
    fn missing_uri_is_malformed() {
        let mapper = TaskProcessMapper::new();
        let doc = Document::new(key());

        assert!(matches!(
            mapper.to_record(key(), &doc),
            Err(Error::MalformedRecord { .. })
        ));
    }
}
