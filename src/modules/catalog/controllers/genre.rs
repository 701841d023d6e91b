use axum::extract::{Path, State};
use axum_extra::extract::Form;
use library_db::{Filter, Query, Sort};
use library_http::error::AppError;

use super::{page, redirect, HandlerResult};
use crate::modules::catalog::models::{Book, Genre, GenreForm, Record};
use crate::modules::catalog::validation::{validate, FieldError};
use crate::modules::catalog::views;
use crate::modules::catalog::CatalogState;

const LIST_URL: &str = "/catalog/genres";

fn books_in(genre_id: &str) -> Query {
    Query::new()
        .filter(Filter::all().eq("genre", genre_id))
        .project(&["title", "summary"])
}

async fn with_books(
    state: &CatalogState,
    id: &str,
) -> anyhow::Result<(Option<Record<Genre>>, Vec<Record<Book>>)> {
    let genres = state.genres();
    let books = state.books();
    let query = books_in(id);
    tokio::try_join!(genres.find_by_id(id), books.find(&query))
}

/// Existing genre with the same name, ignoring case
async fn find_by_name(state: &CatalogState, name: &str) -> anyhow::Result<Option<Record<Genre>>> {
    state
        .genres()
        .find_one(&Filter::all().eq_ignore_case("name", name))
        .await
}

pub async fn genre_list(State(state): State<CatalogState>) -> HandlerResult {
    let genres = state
        .genres()
        .find(&Query::new().sort(Sort::asc("name")))
        .await?;
    Ok(page(views::genre::list(&genres)))
}

pub async fn genre_detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let (genre, books) = with_books(&state, &id).await?;
    let genre = genre.ok_or_else(|| AppError::not_found("Genre not found"))?;
    Ok(page(views::genre::detail(&genre, &books)))
}

pub async fn genre_create_get() -> HandlerResult {
    Ok(page(views::genre::form("Create Genre", &GenreForm::default(), &[])))
}

pub async fn genre_create_post(
    State(state): State<CatalogState>,
    Form(form): Form<GenreForm>,
) -> HandlerResult {
    let validated = validate(form);

    if !validated.is_valid() {
        tracing::debug!(errors = validated.errors.len(), "genre rejected by validation");
        return Ok(page(views::genre::form(
            "Create Genre",
            &validated.form,
            &validated.errors,
        )));
    }

    let genre = Genre::from_form(&validated.form);
    if let Some(existing) = find_by_name(&state, &genre.name).await? {
        tracing::debug!(id = %existing.id, "genre already exists");
        return Ok(redirect(&existing.url()));
    }

    let genre = state.genres().insert(genre).await?;
    tracing::info!(id = %genre.id, "genre created");
    Ok(redirect(&genre.url()))
}

pub async fn genre_update_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let genre = state
        .genres()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Genre Id: {id} not found.")))?;
    Ok(page(views::genre::form("Update Genre", &GenreForm::from(&genre.doc), &[])))
}

pub async fn genre_update_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    Form(form): Form<GenreForm>,
) -> HandlerResult {
    let validated = validate(form);

    if !validated.is_valid() {
        tracing::debug!(%id, errors = validated.errors.len(), "genre update rejected by validation");
        return Ok(page(views::genre::form(
            "Update Genre",
            &validated.form,
            &validated.errors,
        )));
    }

    let genre = Genre::from_form(&validated.form);
    if let Some(existing) = find_by_name(&state, &genre.name).await? {
        if existing.id != id {
            let errors = [FieldError::new("name", "Genre already exists")];
            return Ok(page(views::genre::form(
                "Update Genre",
                &validated.form,
                &errors,
            )));
        }
    }

    let genre = state
        .genres()
        .replace(&id, genre)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Genre Id: {id} not found.")))?;
    tracing::info!(id = %genre.id, "genre updated");
    Ok(redirect(&genre.url()))
}

pub async fn genre_delete_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    match with_books(&state, &id).await? {
        (Some(genre), books) => Ok(page(views::genre::delete(&genre, &books))),
        (None, _) => Ok(redirect(LIST_URL)),
    }
}

pub async fn genre_delete_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let (genre, books) = with_books(&state, &id).await?;
    let Some(genre) = genre else {
        return Ok(redirect(LIST_URL));
    };

    if !books.is_empty() {
        tracing::debug!(id = %genre.id, books = books.len(), "genre deletion blocked by books");
        return Ok(page(views::genre::delete(&genre, &books)));
    }

    state.genres().delete(&genre.id).await?;
    tracing::info!(id = %genre.id, "genre deleted");
    Ok(redirect(LIST_URL))
}
