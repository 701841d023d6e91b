use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StoreError;
use crate::query::{Filter, Query};

/// A stored document: its identifier plus the JSON object body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub body: Value,
}

/// Collection-oriented document store.
///
/// Every operation is atomic for the single document it touches; there are
/// no multi-document transactions and concurrent writers race with
/// last-write-wins semantics.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return its freshly assigned identifier
    async fn insert(&self, collection: &str, body: Value) -> Result<String, StoreError>;

    /// Fetch one document by identifier
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Fetch every matching document, sorted and projected as requested.
    /// Without a sort key documents come back in insertion order.
    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError>;

    /// First matching document in insertion order
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Number of matching documents
    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError>;

    /// Overwrite the document stored under `id`, keeping the identifier.
    /// Returns `false` when no such document exists.
    async fn replace(&self, collection: &str, id: &str, body: Value) -> Result<bool, StoreError>;

    /// Remove a document. Returns `false` when no such document exists.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError>;
}
