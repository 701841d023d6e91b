use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use library_kernel::settings::DatabaseSettings;
use library_kernel::{InitCtx, Module};

use crate::sqlite::SqliteStore;

/// Core module owning the process-wide store: opened once before any other
/// module runs and closed on shutdown.
pub struct DbModule {
    store: Arc<SqliteStore>,
}

impl DbModule {
    pub fn new(store: Arc<SqliteStore>) -> Self {
        Self { store }
    }

    /// Open the store described by the database settings
    pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<Arc<SqliteStore>> {
        let store = SqliteStore::connect(&settings.url, settings.max_connections)
            .await
            .with_context(|| format!("failed to open document store at {}", settings.url))?;
        Ok(Arc::new(store))
    }
}

#[async_trait]
impl Module for DbModule {
    fn name(&self) -> &'static str {
        "db"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let stats = self
            .store
            .stats()
            .await
            .context("failed to read document store statistics")?;
        tracing::info!(module = self.name(), collections = ?stats, "document store ready");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.store.close().await;
        tracing::info!(module = self.name(), "document store closed");
        Ok(())
    }
}
