//! Enqueue dispatch: real queue service or local emulator.

use std::sync::Arc;

use crate::domain::{QueueConfig, TaskRecord};
use crate::error::Result;
use crate::mapper::TaskMapper;
use crate::ports::{CloudQueue, DocumentStore};

/// Routes enqueue calls per configuration.
///
/// Cloud mode forwards to the queue client unchanged. Emulator mode persists
/// the task as a pending document at `task.key` with a single
/// non-transactional put; enqueuing twice with the same key overwrites, with
/// no deduplication at this layer.
pub struct EnqueueService {
    config: QueueConfig,
    store: Arc<dyn DocumentStore>,
    cloud_queue: Arc<dyn CloudQueue>,
    mapper: TaskMapper,
}

impl EnqueueService {
    /// Fails on an invalid configuration (emulator mode without a host), so
    /// bad wiring is a startup error rather than a call-time one.
    pub fn new(
        config: QueueConfig,
        store: Arc<dyn DocumentStore>,
        cloud_queue: Arc<dyn CloudQueue>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            store,
            cloud_queue,
            mapper: TaskMapper::new(),
        })
    }

    pub async fn enqueue(&self, task: &TaskRecord, queue_name: Option<&str>) -> Result<()> {
        if self.config.use_local_emulator {
            self.enqueue_to_emulator(task).await
        } else {
            self.enqueue_to_cloud(task, queue_name).await
        }
    }

    async fn enqueue_to_cloud(&self, task: &TaskRecord, queue_name: Option<&str>) -> Result<()> {
        tracing::debug!(key = %task.key(), ?queue_name, "enqueue via cloud queue");
        self.cloud_queue.enqueue(task, queue_name).await
    }

    async fn enqueue_to_emulator(&self, task: &TaskRecord) -> Result<()> {
        tracing::debug!(key = %task.key(), "enqueue via local emulator store");
        self.store.put(self.mapper.to_document(task)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EntityKey, EntityKeyFactory};
    use crate::error::Error;
    use crate::impls::MemoryStore;
    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Mutex;

    /// Records enqueued task keys instead of talking to a real service.
    #[derive(Default)]
    struct RecordingQueue {
        calls: Mutex<Vec<(EntityKey, Option<String>)>>,
    }

    #[async_trait]
    impl CloudQueue for RecordingQueue {
        async fn enqueue(&self, task: &TaskRecord, queue_name: Option<&str>) -> Result<()> {
            self.calls
                .lock()
                .await
                .push((task.key().clone(), queue_name.map(String::from)));
            Ok(())
        }
    }

    fn sample_task() -> TaskRecord {
        let key = EntityKeyFactory::new()
            .build_from_pairs([("Task", "abc")])
            .unwrap();
        TaskRecord::new(
            key,
            "/work",
            "POST",
            serde_json::json!({"n": 1}),
            None,
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn cloud_mode_forwards_to_queue_client() {
        let store = Arc::new(MemoryStore::new());
        let queue = Arc::new(RecordingQueue::default());
        let service =
            EnqueueService::new(QueueConfig::cloud(), store.clone(), queue.clone()).unwrap();
        let task = sample_task();

        service.enqueue(&task, Some("high-priority")).await.unwrap();

        let calls = queue.calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, *task.key());
        assert_eq!(calls[0].1.as_deref(), Some("high-priority"));
        assert!(store.get(task.key()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn emulator_mode_writes_pending_document() {
        let store = Arc::new(MemoryStore::new());
        let queue = Arc::new(RecordingQueue::default());
        let service = EnqueueService::new(
            QueueConfig::emulator("localhost:8081"),
            store.clone(),
            queue.clone(),
        )
        .unwrap();
        let task = sample_task();

        service.enqueue(&task, None).await.unwrap();

        assert!(queue.calls.lock().await.is_empty());
        let doc = store.get(task.key()).await.unwrap().expect("pending doc");
        assert_eq!(
            doc.get("relative_uri"),
            Some(&serde_json::Value::String("/work".into()))
        );
    }

    #[tokio::test]
    async fn same_key_enqueue_overwrites() {
        let store = Arc::new(MemoryStore::new());
        let service = EnqueueService::new(
            QueueConfig::emulator("localhost:8081"),
            store.clone(),
            Arc::new(RecordingQueue::default()),
        )
        .unwrap();

        let first = sample_task();
        let second = TaskRecord::new(
            first.key().clone(),
            "/other",
            "GET",
            serde_json::Value::Null,
            None,
            Utc::now(),
        );

        service.enqueue(&first, None).await.unwrap();
        service.enqueue(&second, None).await.unwrap();

        let doc = store.get(first.key()).await.unwrap().unwrap();
        assert_eq!(
            doc.get("relative_uri"),
            Some(&serde_json::Value::String("/other".into()))
        );
    }

    #[tokio::test]
    async fn invalid_config_fails_at_construction() {
        let config = QueueConfig {
            use_local_emulator: true,
            emulator_host: None,
            namespace: None,
        };
        let result = EnqueueService::new(
            config,
            Arc::new(MemoryStore::new()),
            Arc::new(RecordingQueue::default()),
        );
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
