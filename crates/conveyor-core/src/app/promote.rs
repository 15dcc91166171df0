//! Promotion: atomic conversion of pending tasks into task processes.

use std::sync::Arc;

use crate::domain::{EntityKey, TaskProcessFactory, TaskProcessRecord, TaskRecord};
use crate::error::{Error, Result};
use crate::mapper::TaskProcessMapper;
use crate::ports::{Clock, DocumentStore};

use super::fetch::TaskFetchService;

/// Pending tasks considered per invocation.
pub const PROMOTION_BATCH_LIMIT: usize = 50;

/// One task that could not be promoted this tick. Its pending document is
/// untouched; the next invocation retries it.
#[derive(Debug)]
pub struct PromotionFailure {
    pub task_key: EntityKey,
    pub error: Error,
}

/// Outcome of one promotion pass.
#[derive(Debug, Default)]
pub struct PromotionReport {
    /// Processes newly created by this invocation (not ones that already
    /// existed).
    pub created: Vec<TaskProcessRecord>,
    /// Per-task failures. Sibling tasks in the batch are unaffected.
    pub failures: Vec<PromotionFailure>,
}

/// Converts each pending task into a task-process record, exactly once.
///
/// Correctness under concurrent invocation (overlapping scheduler ticks,
/// multiple instances) is delegated to the store's transaction isolation:
/// each task gets its own transaction, and the existence check, create, and
/// delete commit atomically or not at all. No in-process locking, no
/// cross-task ordering.
pub struct PromotionService<C> {
    store: Arc<dyn DocumentStore>,
    fetch: TaskFetchService,
    factory: TaskProcessFactory<C>,
    mapper: TaskProcessMapper,
}

impl<C: Clock> PromotionService<C> {
    pub fn new(store: Arc<dyn DocumentStore>, clock: C) -> Self {
        Self {
            fetch: TaskFetchService::new(store.clone()),
            store,
            factory: TaskProcessFactory::new(clock),
            mapper: TaskProcessMapper::new(),
        }
    }

    /// Run one promotion pass.
    ///
    /// Returns `Err` only when the batch itself cannot be fetched; per-task
    /// failures land in the report and leave their pending documents in
    /// place. Re-running after a fully committed pass is a no-op, since the
    /// pending documents no longer exist to be fetched.
    pub async fn execute(&self) -> Result<PromotionReport> {
        let tasks = self.fetch.fetch(PROMOTION_BATCH_LIMIT).await?;
        tracing::info!(count = tasks.len(), "promoting pending tasks");

        let mut report = PromotionReport::default();
        for task in tasks {
            let process = self.factory.build_from_task(&task);
            match self.promote_one(&task, &process).await {
                Ok(true) => {
                    tracing::debug!(key = %process.key(), "task process created");
                    report.created.push(process);
                }
                Ok(false) => {
                    tracing::debug!(key = %process.key(), "task process already present");
                }
                Err(error) => {
                    tracing::warn!(key = %task.key(), %error, "promotion failed, task left pending");
                    report.failures.push(PromotionFailure {
                        task_key: task.key().clone(),
                        error,
                    });
                }
            }
        }
        Ok(report)
    }

    /// One transaction per task: read the derived key, create the process if
    /// absent, delete the pending document, commit. Create-then-delete inside
    /// a single atomic unit means there is no window where the task is lost
    /// or duplicated.
    ///
    /// Returns whether the process was newly created.
    async fn promote_one(&self, task: &TaskRecord, process: &TaskProcessRecord) -> Result<bool> {
        let mut tx = self.store.begin().await?;

        let created = match tx.get(process.key()).await? {
            Some(_) => false,
            None => {
                tx.put(self.mapper.to_document(process));
                true
            }
        };
        tx.delete(task.key());
        tx.commit().await?;

        Ok(created)
    }
}
