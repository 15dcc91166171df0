//! Ports: the seams to external systems.
//!
//! Each trait hides an external collaborator (the document store, the real
//! queue service, the wall clock) so the application layer can be wired
//! against the in-memory emulator or test doubles.

pub mod clock;
pub mod queue;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use queue::CloudQueue;
pub use store::{Document, DocumentStore, StoreTransaction};
