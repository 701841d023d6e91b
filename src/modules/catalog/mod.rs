//! The library catalog: Authors, Genres, Books and their physical copies.

pub mod controllers;
pub mod models;
pub mod routes;
pub mod validation;
pub mod views;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use library_db::DocumentStore;
use library_kernel::{InitCtx, Module, RouteInfo};

use models::{Author, Book, BookInstance, Collection, Genre};

/// Shared handler state: one handle on the document store
#[derive(Clone)]
pub struct CatalogState {
    store: Arc<dyn DocumentStore>,
}

impl CatalogState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn authors(&self) -> Collection<Author> {
        Collection::new(self.store.clone())
    }

    pub fn genres(&self) -> Collection<Genre> {
        Collection::new(self.store.clone())
    }

    pub fn books(&self) -> Collection<Book> {
        Collection::new(self.store.clone())
    }

    pub fn book_instances(&self) -> Collection<BookInstance> {
        Collection::new(self.store.clone())
    }
}

pub struct CatalogModule {
    state: CatalogState,
}

impl CatalogModule {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            state: CatalogState::new(store),
        }
    }
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            routes = self.route_table().len(),
            "catalog module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::catalog_routes().into_router(self.state.clone())
    }

    fn route_table(&self) -> Vec<RouteInfo> {
        routes::catalog_routes().into_table()
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "catalog module stopped");
        Ok(())
    }
}

/// Create the catalog module over the given store
pub fn create_module(store: Arc<dyn DocumentStore>) -> Arc<dyn Module> {
    Arc::new(CatalogModule::new(store))
}
