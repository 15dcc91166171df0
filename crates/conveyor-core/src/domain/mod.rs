//! Domain model (keys, records, configuration).

pub mod config;
pub mod entity_key;
pub mod task;
pub mod task_process;

pub use config::QueueConfig;
pub use entity_key::{EntityKey, EntityKeyFactory, KeyPair};
pub use task::TaskRecord;
pub use task_process::{TaskProcessFactory, TaskProcessRecord};
