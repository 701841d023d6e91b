//! Catalog entities and the typed document mapping over the store.
//!
//! Each entity is a plain serde struct stored as one JSON document. Display
//! fields (full names, formatted dates, canonical URLs) are computed from the
//! stored attributes when read and never persisted.

mod author;
mod book;
mod book_instance;
mod genre;

use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use anyhow::Context;
use library_db::{Document, DocumentStore, Filter, Query};
use serde::{de::DeserializeOwned, Serialize};

pub use author::{Author, AuthorForm};
pub use book::{Book, BookForm};
pub use book_instance::{BookInstance, BookInstanceForm, Status};
pub use genre::{Genre, GenreForm};

/// A persisted catalog entity type
pub trait Model: Serialize + DeserializeOwned + Send + Sync + Sized {
    /// Store collection holding this entity
    const COLLECTION: &'static str;
    /// URL segment under `/catalog/` for this entity
    const ROUTE: &'static str;
}

/// An entity together with its store identifier
#[derive(Debug, Clone, PartialEq)]
pub struct Record<M> {
    pub id: String,
    pub doc: M,
}

impl<M: Model> Record<M> {
    /// Canonical URL of the entity's detail view
    pub fn url(&self) -> String {
        format!("/catalog/{}/{}", M::ROUTE, self.id)
    }

    fn decode(document: Document) -> anyhow::Result<Self> {
        let doc = serde_json::from_value(document.body).with_context(|| {
            format!(
                "malformed document '{}' in collection '{}'",
                document.id,
                M::COLLECTION
            )
        })?;
        Ok(Self {
            id: document.id,
            doc,
        })
    }
}

impl<M> Deref for Record<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.doc
    }
}

/// Typed handle on one collection
pub struct Collection<M> {
    store: Arc<dyn DocumentStore>,
    _model: PhantomData<fn() -> M>,
}

impl<M: Model> Collection<M> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _model: PhantomData,
        }
    }

    pub async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<Record<M>>> {
        let document = self
            .store
            .get(M::COLLECTION, id)
            .await
            .with_context(|| format!("failed to load {} '{}'", M::COLLECTION, id))?;
        document.map(Record::decode).transpose()
    }

    pub async fn find(&self, query: &Query) -> anyhow::Result<Vec<Record<M>>> {
        let documents = self
            .store
            .find(M::COLLECTION, query)
            .await
            .with_context(|| format!("failed to query {}", M::COLLECTION))?;
        documents.into_iter().map(Record::decode).collect()
    }

    /// Records whose identifiers appear in `ids`, in the order `query` yields them.
    /// Identifiers that do not resolve are skipped.
    pub async fn find_by_ids(&self, ids: &[String], query: &Query) -> anyhow::Result<Vec<Record<M>>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let records = self.find(query).await?;
        Ok(records
            .into_iter()
            .filter(|record| ids.contains(&record.id))
            .collect())
    }

    pub async fn find_one(&self, filter: &Filter) -> anyhow::Result<Option<Record<M>>> {
        let document = self
            .store
            .find_one(M::COLLECTION, filter)
            .await
            .with_context(|| format!("failed to query {}", M::COLLECTION))?;
        document.map(Record::decode).transpose()
    }

    pub async fn count(&self, filter: &Filter) -> anyhow::Result<u64> {
        self.store
            .count(M::COLLECTION, filter)
            .await
            .with_context(|| format!("failed to count {}", M::COLLECTION))
    }

    pub async fn insert(&self, doc: M) -> anyhow::Result<Record<M>> {
        let body = serde_json::to_value(&doc)
            .with_context(|| format!("failed to encode {}", M::COLLECTION))?;
        let id = self
            .store
            .insert(M::COLLECTION, body)
            .await
            .with_context(|| format!("failed to insert into {}", M::COLLECTION))?;
        Ok(Record { id, doc })
    }

    /// Overwrite the entity at `id`; `None` when it no longer exists
    pub async fn replace(&self, id: &str, doc: M) -> anyhow::Result<Option<Record<M>>> {
        let body = serde_json::to_value(&doc)
            .with_context(|| format!("failed to encode {}", M::COLLECTION))?;
        let replaced = self
            .store
            .replace(M::COLLECTION, id, body)
            .await
            .with_context(|| format!("failed to update {} '{}'", M::COLLECTION, id))?;
        Ok(replaced.then(|| Record {
            id: id.to_string(),
            doc,
        }))
    }

    pub async fn delete(&self, id: &str) -> anyhow::Result<bool> {
        self.store
            .delete(M::COLLECTION, id)
            .await
            .with_context(|| format!("failed to delete {} '{}'", M::COLLECTION, id))
    }
}
