use axum::extract::State;
use library_db::Filter;

use super::{page, redirect, HandlerResult};
use crate::modules::catalog::models::Status;
use crate::modules::catalog::views::{self, index::CatalogCounts};
use crate::modules::catalog::CatalogState;

/// Site root: the catalog is the only thing served
pub async fn root() -> HandlerResult {
    Ok(redirect("/catalog/"))
}

/// Catalog home page with record counts
pub async fn index(State(state): State<CatalogState>) -> HandlerResult {
    let all = Filter::all();
    let available = Filter::all().eq("status", Status::Available.as_str());
    let books = state.books();
    let copies = state.book_instances();
    let authors = state.authors();
    let genres = state.genres();

    let (books, book_instances, book_instances_available, authors, genres) = tokio::try_join!(
        books.count(&all),
        copies.count(&all),
        copies.count(&available),
        authors.count(&all),
        genres.count(&all),
    )?;

    let counts = CatalogCounts {
        books,
        book_instances,
        book_instances_available,
        authors,
        genres,
    };
    Ok(page(views::index::dashboard(&counts)))
}
