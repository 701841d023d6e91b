use std::collections::HashMap;

use axum::extract::{Path, State};
use axum_extra::extract::Form;
use library_db::{Query, Sort};
use library_http::error::AppError;

use super::{page, redirect, HandlerResult};
use crate::modules::catalog::models::{Book, BookInstance, BookInstanceForm, Record};
use crate::modules::catalog::validation::{validate, FieldError};
use crate::modules::catalog::views;
use crate::modules::catalog::CatalogState;

const LIST_URL: &str = "/catalog/bookinstances";

async fn render_form(
    state: &CatalogState,
    title: &str,
    form: &BookInstanceForm,
    errors: &[FieldError],
) -> HandlerResult {
    let by_title = Query::new().sort(Sort::asc("title")).project(&["title"]);
    let books = state.books().find(&by_title).await?;
    Ok(page(views::book_instance::form(title, form, &books, errors)))
}

/// Load a copy together with the book it belongs to
async fn with_book(
    state: &CatalogState,
    id: &str,
) -> anyhow::Result<Option<(Record<BookInstance>, Option<Record<Book>>)>> {
    let Some(copy) = state.book_instances().find_by_id(id).await? else {
        return Ok(None);
    };
    let book = state.books().find_by_id(&copy.book).await?;
    Ok(Some((copy, book)))
}

pub async fn book_instance_list(State(state): State<CatalogState>) -> HandlerResult {
    let copies = state.book_instances();
    let books = state.books();
    let titles = Query::new().project(&["title"]);
    let all = Query::new();
    let (copies, books) = tokio::try_join!(copies.find(&all), books.find(&titles))?;

    let books: HashMap<&str, &Record<Book>> = books.iter().map(|b| (b.id.as_str(), b)).collect();
    let rows: Vec<_> = copies
        .into_iter()
        .map(|copy| {
            let book = books.get(copy.book.as_str()).copied();
            (copy, book)
        })
        .collect();
    Ok(page(views::book_instance::list(&rows)))
}

pub async fn book_instance_detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let (copy, book) = with_book(&state, &id)
        .await?
        .ok_or_else(|| AppError::not_found("Book copy not found"))?;
    Ok(page(views::book_instance::detail(&copy, book.as_ref())))
}

pub async fn book_instance_create_get(State(state): State<CatalogState>) -> HandlerResult {
    render_form(&state, "Create BookInstance", &BookInstanceForm::default(), &[]).await
}

pub async fn book_instance_create_post(
    State(state): State<CatalogState>,
    Form(form): Form<BookInstanceForm>,
) -> HandlerResult {
    let validated = validate(form);

    if !validated.is_valid() {
        tracing::debug!(errors = validated.errors.len(), "book copy rejected by validation");
        return render_form(
            &state,
            "Create BookInstance",
            &validated.form,
            &validated.errors,
        )
        .await;
    }

    let copy = state
        .book_instances()
        .insert(BookInstance::from_form(&validated.form))
        .await?;
    tracing::info!(id = %copy.id, book = %copy.book, "book copy created");
    Ok(redirect(&copy.url()))
}

pub async fn book_instance_update_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let copy = state
        .book_instances()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Book copy not found"))?;
    render_form(&state, "Update BookInstance", &BookInstanceForm::from(&copy.doc), &[]).await
}

pub async fn book_instance_update_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> HandlerResult {
    let validated = validate(form);

    // Nothing is written on a rejected submission.
    if !validated.is_valid() {
        tracing::debug!(%id, errors = validated.errors.len(), "book copy update rejected by validation");
        return render_form(
            &state,
            "Update BookInstance",
            &validated.form,
            &validated.errors,
        )
        .await;
    }

    let copy = state
        .book_instances()
        .replace(&id, BookInstance::from_form(&validated.form))
        .await?
        .ok_or_else(|| AppError::not_found("Book copy not found"))?;
    tracing::info!(id = %copy.id, "book copy updated");
    Ok(redirect(&copy.url()))
}

pub async fn book_instance_delete_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    match with_book(&state, &id).await? {
        Some((copy, book)) => Ok(page(views::book_instance::delete(&copy, book.as_ref()))),
        None => Ok(redirect(LIST_URL)),
    }
}

pub async fn book_instance_delete_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    if state.book_instances().delete(&id).await? {
        tracing::info!(%id, "book copy deleted");
    }
    Ok(redirect(LIST_URL))
}
