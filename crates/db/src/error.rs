use thiserror::Error;

/// Failures raised by a document store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("schema migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("invalid document for collection '{collection}': {reason}")]
    InvalidDocument {
        collection: String,
        reason: &'static str,
    },
}
