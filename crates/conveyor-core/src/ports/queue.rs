//! Cloud queue port: the real push-task service, consumed not implemented.

use async_trait::async_trait;

use crate::domain::TaskRecord;
use crate::error::Result;

/// Client for the real distributed push-task queue.
///
/// `queue_name` of `None` leaves the choice to the client's own default.
/// Fire-and-forget from the dispatch layer's perspective; failures propagate
/// as [`crate::error::Error::Queue`].
#[async_trait]
pub trait CloudQueue: Send + Sync {
    async fn enqueue(&self, task: &TaskRecord, queue_name: Option<&str>) -> Result<()>;
}
