//! Document store port: keyed documents with transactional writes.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::EntityKey;
use crate::error::Result;

/// A stored document: an entity key plus named JSON fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    key: EntityKey,
    fields: Map<String, Value>,
}

impl Document {
    pub fn new(key: EntityKey) -> Self {
        Self {
            key,
            fields: Map::new(),
        }
    }

    pub fn key(&self) -> &EntityKey {
        &self.key
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Store port (interface).
///
/// Absence is `Ok(None)`, never an error: "not found" is business logic for
/// the promotion service's existence check, not an exceptional condition.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document.
    async fn get(&self, key: &EntityKey) -> Result<Option<Document>>;

    /// Write one document (create or overwrite), outside any transaction.
    async fn put(&self, doc: Document) -> Result<()>;

    /// Delete one document, outside any transaction. Deleting an absent key
    /// is a no-op.
    async fn delete(&self, key: &EntityKey) -> Result<()>;

    /// List documents whose key kind matches, in store-default order,
    /// bounded by `limit`.
    async fn fetch_by_kind(&self, kind: &str, limit: usize) -> Result<Vec<Document>>;

    /// Open a transaction. All-or-nothing on commit.
    async fn begin(&self) -> Result<Box<dyn StoreTransaction>>;
}

/// A scoped transaction. The caller owns it and must `commit`; dropping it
/// aborts with no visible effect.
///
/// Design intent:
/// - Reads are tracked so commit can detect conflicting writers.
/// - Writes are buffered; nothing is observable outside the transaction
///   until commit succeeds.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Read inside the transaction (sees this transaction's own buffered
    /// writes).
    async fn get(&mut self, key: &EntityKey) -> Result<Option<Document>>;

    /// Buffer a create/overwrite.
    fn put(&mut self, doc: Document);

    /// Buffer a delete.
    fn delete(&mut self, key: &EntityKey);

    /// Atomically validate reads and apply buffered writes. On error the
    /// store is left exactly as it was.
    async fn commit(self: Box<Self>) -> Result<()>;
}
