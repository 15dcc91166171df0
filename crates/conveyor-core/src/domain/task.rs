//! Pending task record: an enqueued unit of work awaiting promotion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity_key::EntityKey;

/// A task enqueued but not yet claimed for execution.
///
/// Lives in the store only while pending: the promotion service deletes it
/// in the same transaction that creates the task-process record, so the two
/// are never both present after a committed promotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    key: EntityKey,
    relative_uri: String,
    method: String,
    payload: Value,
    schedule_time: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Store kind for pending task documents.
    pub const KIND: &'static str = "Task";

    pub fn new(
        key: EntityKey,
        relative_uri: impl Into<String>,
        method: impl Into<String>,
        payload: Value,
        schedule_time: Option<DateTime<Utc>>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key,
            relative_uri: relative_uri.into(),
            method: method.into(),
            payload,
            schedule_time,
            created_at,
        }
    }

    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn relative_uri(&self) -> &str {
        &self.relative_uri
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn schedule_time(&self) -> Option<DateTime<Utc>> {
        self.schedule_time
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
