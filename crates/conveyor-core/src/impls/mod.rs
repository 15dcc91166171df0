//! Implementations of the ports (in-memory, for the emulator and tests).

pub mod memory_store;
pub mod null_queue;

pub use memory_store::MemoryStore;
pub use null_queue::NullQueue;
