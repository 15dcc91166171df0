//! In-memory document store: backing store for the local emulator.

use std::sync::Arc;
use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::EntityKey;
use crate::error::{Error, Result};
use crate::ports::{Document, DocumentStore, StoreTransaction};

/// Documents are addressed by their flattened kind/name pair sequence.
type FlatKey = Vec<String>;

#[derive(Debug, Clone)]
struct Versioned {
    doc: Document,
    version: u64,
}

/// Store state behind one lock.
///
/// BTreeMap gives a deterministic iteration order, which is the
/// "store-default" order fetch exposes.
struct MemoryStoreState {
    docs: BTreeMap<FlatKey, Versioned>,
    next_version: u64,
}

impl MemoryStoreState {
    fn new() -> Self {
        Self {
            docs: BTreeMap::new(),
            next_version: 0,
        }
    }

    fn bump(&mut self) -> u64 {
        self.next_version += 1;
        self.next_version
    }

    fn version_of(&self, flat: &FlatKey) -> Option<u64> {
        self.docs.get(flat).map(|v| v.version)
    }

    fn put(&mut self, doc: Document) {
        let flat = doc.key().flat_pairs();
        let version = self.bump();
        self.docs.insert(flat, Versioned { doc, version });
    }

    fn delete(&mut self, flat: &FlatKey) {
        self.docs.remove(flat);
    }
}

/// In-memory [`DocumentStore`] with optimistic per-key transactions.
///
/// Transactions record the version (or absence) of every key they read and
/// buffer their writes; commit re-validates the reads under the store lock
/// and applies the buffer atomically. A key changed by another writer since
/// it was read fails the commit with [`Error::TransactionConflict`], leaving
/// the store untouched.
pub struct MemoryStore {
    state: Arc<Mutex<MemoryStoreState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryStoreState::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, key: &EntityKey) -> Result<Option<Document>> {
        let state = self.state.lock().await;
        Ok(state.docs.get(&key.flat_pairs()).map(|v| v.doc.clone()))
    }

    async fn put(&self, doc: Document) -> Result<()> {
        let mut state = self.state.lock().await;
        state.put(doc);
        Ok(())
    }

    async fn delete(&self, key: &EntityKey) -> Result<()> {
        let mut state = self.state.lock().await;
        state.delete(&key.flat_pairs());
        Ok(())
    }

    async fn fetch_by_kind(&self, kind: &str, limit: usize) -> Result<Vec<Document>> {
        let state = self.state.lock().await;
        Ok(state
            .docs
            .values()
            .filter(|v| v.doc.key().kind() == kind)
            .take(limit)
            .map(|v| v.doc.clone())
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn StoreTransaction>> {
        Ok(Box::new(MemoryTransaction {
            state: Arc::clone(&self.state),
            reads: Vec::new(),
            writes: Vec::new(),
        }))
    }
}

enum WriteOp {
    Put(Document),
    Delete(EntityKey),
}

struct ReadObservation {
    flat: FlatKey,
    key: EntityKey,
    version: Option<u64>,
}

/// A buffered transaction over [`MemoryStore`]. Dropping it discards the
/// buffers, so abort is the default on every exit path.
struct MemoryTransaction {
    state: Arc<Mutex<MemoryStoreState>>,
    reads: Vec<ReadObservation>,
    writes: Vec<WriteOp>,
}

impl MemoryTransaction {
    /// A read served from this transaction's own buffer, if any. Later
    /// writes shadow earlier ones.
    fn buffered(&self, flat: &FlatKey) -> Option<Option<Document>> {
        for op in self.writes.iter().rev() {
            match op {
                WriteOp::Put(doc) if doc.key().flat_pairs() == *flat => {
                    return Some(Some(doc.clone()));
                }
                WriteOp::Delete(key) if key.flat_pairs() == *flat => return Some(None),
                _ => {}
            }
        }
        None
    }
}

#[async_trait]
impl StoreTransaction for MemoryTransaction {
    async fn get(&mut self, key: &EntityKey) -> Result<Option<Document>> {
        let flat = key.flat_pairs();
        if let Some(shadowed) = self.buffered(&flat) {
            return Ok(shadowed);
        }

        let state = self.state.lock().await;
        let version = state.version_of(&flat);
        let doc = state.docs.get(&flat).map(|v| v.doc.clone());
        drop(state);

        // First observation wins; re-reads must validate against it.
        if !self.reads.iter().any(|r| r.flat == flat) {
            self.reads.push(ReadObservation {
                flat,
                key: key.clone(),
                version,
            });
        }
        Ok(doc)
    }

    fn put(&mut self, doc: Document) {
        self.writes.push(WriteOp::Put(doc));
    }

    fn delete(&mut self, key: &EntityKey) {
        self.writes.push(WriteOp::Delete(key.clone()));
    }

    async fn commit(self: Box<Self>) -> Result<()> {
        let MemoryTransaction {
            state,
            reads,
            writes,
        } = *self;
        let mut state = state.lock().await;

        // Validate: every key read must be exactly as observed, including
        // keys observed absent. One changed key aborts the whole commit.
        for read in &reads {
            if state.version_of(&read.flat) != read.version {
                return Err(Error::TransactionConflict(read.key.to_string()));
            }
        }

        for op in writes {
            match op {
                WriteOp::Put(doc) => state.put(doc),
                WriteOp::Delete(key) => state.delete(&key.flat_pairs()),
            }
        }
        Ok(())
    }
}
