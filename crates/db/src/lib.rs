//! Document store for the library catalog.
//!
//! Documents are JSON objects grouped in named collections and addressed by
//! an opaque identifier assigned on insert. The [`DocumentStore`] trait is
//! the seam the catalog talks to; [`SqliteStore`] implements it on SQLite,
//! either in memory or in a database file, and the [`DbModule`] owns it for
//! the lifetime of the process.

pub mod error;
pub mod module;
pub mod query;
pub mod sqlite;
pub mod store;

pub use error::StoreError;
pub use module::DbModule;
pub use query::{Condition, Filter, Query, Sort};
pub use sqlite::SqliteStore;
pub use store::{Document, DocumentStore};
