//! Cloud queue stand-in for deployments that run only the emulator.

use async_trait::async_trait;

use crate::domain::TaskRecord;
use crate::error::{Error, Result};
use crate::ports::CloudQueue;

/// Fails every enqueue. Wire this where no real queue client exists so a
/// misrouted dispatch surfaces immediately instead of silently dropping
/// tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullQueue;

impl NullQueue {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CloudQueue for NullQueue {
    async fn enqueue(&self, task: &TaskRecord, _queue_name: Option<&str>) -> Result<()> {
        Err(Error::Queue(format!(
            "no cloud queue client configured (task {})",
            task.key()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntityKeyFactory;
    use chrono::Utc;

    #[tokio::test]
    async fn null_queue_always_errors() {
        let key = EntityKeyFactory::new()
            .build_from_pairs([("Task", "abc")])
            .unwrap();
        let task = TaskRecord::new(key, "/work", "POST", serde_json::Value::Null, None, Utc::now());

        let result = NullQueue::new().enqueue(&task, None).await;
        assert!(matches!(result, Err(Error::Queue(_))));
    }
}
