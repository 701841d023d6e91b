use axum::extract::{Path, State};
use axum_extra::extract::Form;
use library_db::{Filter, Query, Sort};
use library_http::error::AppError;

use super::{page, redirect, HandlerResult};
use crate::modules::catalog::models::{Author, AuthorForm, Book, Record};
use crate::modules::catalog::validation::validate;
use crate::modules::catalog::views;
use crate::modules::catalog::CatalogState;

const LIST_URL: &str = "/catalog/authors";

fn books_by(author_id: &str) -> Query {
    Query::new()
        .filter(Filter::all().eq("author", author_id))
        .project(&["title", "summary"])
}

/// Load an author and the books that reference it
async fn with_books(
    state: &CatalogState,
    id: &str,
) -> anyhow::Result<(Option<Record<Author>>, Vec<Record<Book>>)> {
    let authors = state.authors();
    let books = state.books();
    let query = books_by(id);
    tokio::try_join!(authors.find_by_id(id), books.find(&query))
}

pub async fn author_list(State(state): State<CatalogState>) -> HandlerResult {
    let authors = state
        .authors()
        .find(&Query::new().sort(Sort::asc("family_name")))
        .await?;
    Ok(page(views::author::list(&authors)))
}

pub async fn author_detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let (author, books) = with_books(&state, &id).await?;
    let author = author.ok_or_else(|| AppError::not_found("Author not found"))?;
    Ok(page(views::author::detail(&author, &books)))
}

pub async fn author_create_get() -> HandlerResult {
    Ok(page(views::author::form(
        "Create Author",
        &AuthorForm::default(),
        &[],
    )))
}

pub async fn author_create_post(
    State(state): State<CatalogState>,
    Form(form): Form<AuthorForm>,
) -> HandlerResult {
    let validated = validate(form);

    if !validated.is_valid() {
        tracing::debug!(errors = validated.errors.len(), "author rejected by validation");
        return Ok(page(views::author::form(
            "Create Author",
            &validated.form,
            &validated.errors,
        )));
    }

    let author = state
        .authors()
        .insert(Author::from_form(&validated.form))
        .await?;
    tracing::info!(id = %author.id, "author created");
    Ok(redirect(&author.url()))
}

pub async fn author_update_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let author = state
        .authors()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Author not found"))?;
    Ok(page(views::author::form(
        "Update Author",
        &AuthorForm::from(&author.doc),
        &[],
    )))
}

pub async fn author_update_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> HandlerResult {
    let validated = validate(form);

    if !validated.is_valid() {
        tracing::debug!(%id, errors = validated.errors.len(), "author update rejected by validation");
        return Ok(page(views::author::form(
            "Update Author",
            &validated.form,
            &validated.errors,
        )));
    }

    let author = state
        .authors()
        .replace(&id, Author::from_form(&validated.form))
        .await?
        .ok_or_else(|| AppError::not_found("Author not found"))?;
    tracing::info!(id = %author.id, "author updated");
    Ok(redirect(&author.url()))
}

pub async fn author_delete_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    match with_books(&state, &id).await? {
        (Some(author), books) => Ok(page(views::author::delete(&author, &books))),
        (None, _) => Ok(redirect(LIST_URL)),
    }
}

pub async fn author_delete_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let (author, books) = with_books(&state, &id).await?;
    let Some(author) = author else {
        return Ok(redirect(LIST_URL));
    };

    if !books.is_empty() {
        tracing::debug!(id = %author.id, books = books.len(), "author deletion blocked by books");
        return Ok(page(views::author::delete(&author, &books)));
    }

    state.authors().delete(&author.id).await?;
    tracing::info!(id = %author.id, "author deleted");
    Ok(redirect(LIST_URL))
}
