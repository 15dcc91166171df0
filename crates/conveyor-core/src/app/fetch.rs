//! Listing pending task documents.

use std::sync::Arc;

use crate::domain::TaskRecord;
use crate::error::Result;
use crate::mapper::TaskMapper;
use crate::ports::DocumentStore;

/// Batch size when the caller does not pick one.
pub const DEFAULT_FETCH_LIMIT: usize = 10;

/// Read-only listing of pending tasks, store-default order, bounded.
pub struct TaskFetchService {
    store: Arc<dyn DocumentStore>,
    mapper: TaskMapper,
}

impl TaskFetchService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            mapper: TaskMapper::new(),
        }
    }

    /// Fetch up to `limit` pending tasks. A document that cannot be mapped
    /// is logged and excluded rather than failing the batch.
    pub async fn fetch(&self, limit: usize) -> Result<Vec<TaskRecord>> {
        let docs = self.store.fetch_by_kind(TaskRecord::KIND, limit).await?;

        let mut tasks = Vec::with_capacity(docs.len());
        for doc in docs {
            match self.mapper.to_record(doc.key().clone(), &doc) {
                Ok(task) => tasks.push(task),
                Err(error) => {
                    tracing::warn!(key = %doc.key(), %error, "skipping malformed pending task");
                }
            }
        }
        Ok(tasks)
    }
}
