//! conveyor-core
//!
//! A thin binding between application code and two managed services: a
//! hierarchical key-value document store and a distributed push-task queue,
//! plus a local emulator that replays enqueued tasks through the store when
//! no real queue is available.
//!
//! # Module layout
//! - **domain**: value objects and records (entity keys, tasks, task
//!   processes, configuration)
//! - **ports**: seams to external systems (DocumentStore, CloudQueue, Clock)
//! - **mapper**: record ↔ document translation
//! - **app**: enqueue dispatch, pending-task fetch, and the promotion
//!   service that atomically converts a pending task into a task process
//! - **impls**: in-memory implementations backing the emulator and tests

pub mod app;
pub mod domain;
pub mod error;
pub mod impls;
pub mod mapper;
pub mod ports;

pub use app::{EnqueueService, PromotionReport, PromotionService, TaskFetchService};
pub use domain::{
    EntityKey, EntityKeyFactory, KeyPair, QueueConfig, TaskProcessFactory, TaskProcessRecord,
    TaskRecord,
};
pub use error::{Error, Result};
