//! Task-process record: an in-flight unit of work, plus its factory.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity_key::{EntityKey, EntityKeyFactory};
use super::task::TaskRecord;
use crate::ports::clock::Clock;

/// A task that has been promoted and is ready for (or undergoing) execution.
///
/// Its key is a pure function of the originating task's key, which makes
/// "does a process already exist" a plain existence check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskProcessRecord {
    key: EntityKey,
    relative_uri: String,
    method: String,
    payload: Value,
    schedule_time: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TaskProcessRecord {
    /// Store kind for task-process documents.
    pub const KIND: &'static str = "TaskProcess";

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

    /// When the process record was created (promotion time, not enqueue time).
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Key of the process record for a given task key: same ancestors, same
    /// name, last pair's kind replaced by [`TaskProcessRecord::KIND`].
    ///
    /// Deterministic, so repeated derivation from the same task yields the
    /// same identity and "does a process exist" is a plain lookup.
    pub fn derive_key(task_key: &EntityKey) -> EntityKey {
        let pairs = task_key.pairs();
        let derived: Vec<(&str, &str)> = pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| {
                if i == pairs.len() - 1 {
                    (Self::KIND, pair.name())
                } else {
                    (pair.kind(), pair.name())
                }
            })
            .collect();
        // Task keys are non-root, so the derived pair list is non-empty.
        EntityKeyFactory::new()
            .build_from_pairs(derived)
            .unwrap_or(EntityKey::ROOT)
    }
}

/// Derives task-process records from pending tasks.
///
/// Generic over [`Clock`] so tests can pin the creation timestamp.
#[derive(Debug, Clone)]
pub struct TaskProcessFactory<C> {
    clock: C,
}

impl<C: Clock> TaskProcessFactory<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Copy the task's fields into a process record stamped with now.
    pub fn build_from_task(&self, task: &TaskRecord) -> TaskProcessRecord {
        TaskProcessRecord::new(
            TaskProcessRecord::derive_key(task.key()),
            task.relative_uri(),
            task.method(),
            task.payload().clone(),
            task.schedule_time(),
            self.clock.now(),
        )
    }
}
