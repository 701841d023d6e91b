use std::collections::BTreeMap;
use std::str::FromStr;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{FromRow, QueryBuilder, Sqlite};
use uuid::Uuid;

use crate::error::StoreError;
use crate::query::{Condition, Filter, Query};
use crate::store::{Document, DocumentStore};

/// In-memory database, used when no file is configured
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    #[sqlx(json)]
    body: Value,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            body: row.body,
        }
    }
}

/// Document store on SQLite.
///
/// All collections share the `documents` table, one JSON body per row.
/// Conditions and sort keys are evaluated by SQLite's JSON functions, and
/// every write is committed before the call returns.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `url` and apply migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // An in-memory database lives only as long as a connection holds it.
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        }
        .connect_with(options)
        .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!(%url, "document store schema ready");

        Ok(Self { pool })
    }

    /// Fresh private in-memory database
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect(IN_MEMORY_URL, 1).await
    }

    /// Number of documents per collection, for startup diagnostics
    pub async fn stats(&self) -> Result<BTreeMap<String, i64>, StoreError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT collection, COUNT(*) FROM documents GROUP BY collection ORDER BY collection",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    /// Wait for in-flight statements and close every connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn ensure_object(collection: &str, body: &Value) -> Result<(), StoreError> {
    if body.is_object() {
        Ok(())
    } else {
        Err(StoreError::InvalidDocument {
            collection: collection.to_string(),
            reason: "document body must be a JSON object",
        })
    }
}

fn json_path(field: &str) -> String {
    format!("$.\"{field}\"")
}

/// `WHERE collection = ?` followed by one `EXISTS` clause per condition.
/// `json_each` yields the value itself for scalars and each element for
/// arrays, which gives array fields any-element semantics.
fn push_where<'a>(builder: &mut QueryBuilder<'a, Sqlite>, collection: &str, filter: &Filter) {
    builder.push(" WHERE collection = ");
    builder.push_bind(collection.to_string());
    for condition in filter.conditions() {
        builder.push(" AND EXISTS (SELECT 1 FROM json_each(documents.body, ");
        builder.push_bind(json_path(condition.field()));
        match condition {
            Condition::Eq { value, .. } => {
                builder.push(") AS item WHERE item.value = ");
                builder.push_bind(value.clone());
            }
            Condition::EqIgnoreCase { value, .. } => {
                builder.push(") AS item WHERE lower(item.value) = lower(");
                builder.push_bind(value.clone());
                builder.push(")");
            }
        }
        builder.push(")");
    }
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn insert(&self, collection: &str, body: Value) -> Result<String, StoreError> {
        ensure_object(collection, &body)?;
        let id = Uuid::now_v7().to_string();

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
            .bind(collection)
            .bind(&id)
            .bind(body.to_string())
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row: Option<DocumentRow> =
            sqlx::query_as("SELECT id, body FROM documents WHERE collection = ? AND id = ?")
                .bind(collection)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Document::from))
    }

    async fn find(&self, collection: &str, query: &Query) -> Result<Vec<Document>, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT id, body FROM documents");
        push_where(&mut builder, collection, &query.filter);

        // NULL (missing field) sorts first; ties keep insertion order
        builder.push(" ORDER BY ");
        if let Some(sort) = &query.sort {
            builder.push("json_extract(body, ");
            builder.push_bind(json_path(&sort.field));
            builder.push("), ");
        }
        builder.push("seq");

        let rows: Vec<DocumentRow> = builder.build_query_as().fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| Document {
                id: row.id,
                body: query.shape(row.body),
            })
            .collect())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT id, body FROM documents");
        push_where(&mut builder, collection, filter);
        builder.push(" ORDER BY seq LIMIT 1");

        let row: Option<DocumentRow> = builder
            .build_query_as()
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Document::from))
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM documents");
        push_where(&mut builder, collection, filter);

        let count: i64 = builder.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(u64::try_from(count).unwrap_or_default())
    }

    async fn replace(&self, collection: &str, id: &str, body: Value) -> Result<bool, StoreError> {
        ensure_object(collection, &body)?;

        let result = sqlx::query("UPDATE documents SET body = ? WHERE collection = ? AND id = ?")
            .bind(body.to_string())
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
