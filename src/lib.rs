//! Library catalog application
//!
//! Wires the catalog module onto the document store and serves it over HTTP.

pub mod modules;
pub mod utils;

use std::sync::Arc;

use anyhow::Context;
use library_db::{DbModule, SqliteStore};
use library_kernel::{settings::Settings, InitCtx, ModuleRegistry};

/// Re-export commonly used types
pub use modules::*;

/// Core store module first, then the catalog over the same store
pub fn build_registry(store: Arc<SqliteStore>) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    registry.register_core(Arc::new(DbModule::new(store.clone())));
    modules::register_all(&mut registry, store);
    registry
}

/// Open the store, run every module lifecycle phase and serve until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        database = %settings.database.url,
        "library-app bootstrap starting"
    );

    let store = DbModule::connect(&settings.database).await?;
    let registry = build_registry(store);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_all(&ctx)
        .await
        .context("module initialization failed")?;
    registry
        .start_all(&ctx)
        .await
        .context("module startup failed")?;

    let served = library_http::start_server(&registry, &settings).await;

    registry
        .stop_all()
        .await
        .context("module shutdown failed")?;
    served
}
