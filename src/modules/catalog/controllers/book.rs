use std::collections::{HashMap, HashSet};

use axum::extract::{Path, State};
use axum_extra::extract::Form;
use library_db::{Filter, Query, Sort};
use library_http::error::AppError;

use super::{page, redirect, HandlerResult};
use crate::modules::catalog::models::{Author, Book, BookForm, BookInstance, Genre, Record};
use crate::modules::catalog::validation::{validate, FieldError};
use crate::modules::catalog::views::{self, book::BookFormChoices};
use crate::modules::catalog::CatalogState;

const LIST_URL: &str = "/catalog/books";

/// Authors and genres offered by the book form
async fn form_choices(
    state: &CatalogState,
) -> anyhow::Result<(Vec<Record<Author>>, Vec<Record<Genre>>)> {
    let authors = state.authors();
    let genres = state.genres();
    let by_family_name = Query::new().sort(Sort::asc("family_name"));
    let by_name = Query::new().sort(Sort::asc("name"));
    tokio::try_join!(authors.find(&by_family_name), genres.find(&by_name))
}

fn copies_of(book_id: &str) -> Query {
    Query::new().filter(Filter::all().eq("book", book_id))
}

async fn with_copies(
    state: &CatalogState,
    id: &str,
) -> anyhow::Result<(Option<Record<Book>>, Vec<Record<BookInstance>>)> {
    let books = state.books();
    let copies = state.book_instances();
    let query = copies_of(id);
    tokio::try_join!(books.find_by_id(id), copies.find(&query))
}

async fn render_form(
    state: &CatalogState,
    title: &str,
    form: &BookForm,
    errors: &[FieldError],
) -> HandlerResult {
    let (authors, genres) = form_choices(state).await?;
    let selected_genres: HashSet<String> = form.genre.iter().cloned().collect();
    let choices = BookFormChoices {
        authors: &authors,
        genres: &genres,
        selected_genres: &selected_genres,
    };
    Ok(page(views::book::form(title, form, &choices, errors)))
}

pub async fn book_list(State(state): State<CatalogState>) -> HandlerResult {
    let books = state.books();
    let authors = state.authors();
    let by_title = Query::new()
        .sort(Sort::asc("title"))
        .project(&["title", "author"]);
    let all = Query::new();
    let (books, authors) = tokio::try_join!(books.find(&by_title), authors.find(&all))?;

    let authors: HashMap<&str, &Record<Author>> =
        authors.iter().map(|a| (a.id.as_str(), a)).collect();
    let rows: Vec<_> = books
        .into_iter()
        .map(|book| {
            let author = authors.get(book.author.as_str()).copied();
            (book, author)
        })
        .collect();
    Ok(page(views::book::list(&rows)))
}

pub async fn book_detail(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let (book, copies) = with_copies(&state, &id).await?;
    let book = book.ok_or_else(|| AppError::not_found("Book not found."))?;

    let authors = state.authors();
    let genres = state.genres();
    let by_name = Query::new().sort(Sort::asc("name"));
    let (author, genres) = tokio::try_join!(
        authors.find_by_id(&book.author),
        genres.find_by_ids(&book.genre, &by_name),
    )?;

    Ok(page(views::book::detail(
        &book,
        author.as_ref(),
        &genres,
        &copies,
    )))
}

pub async fn book_create_get(State(state): State<CatalogState>) -> HandlerResult {
    render_form(&state, "Create Book", &BookForm::default(), &[]).await
}

pub async fn book_create_post(
    State(state): State<CatalogState>,
    Form(form): Form<BookForm>,
) -> HandlerResult {
    let validated = validate(form);

    if !validated.is_valid() {
        tracing::debug!(errors = validated.errors.len(), "book rejected by validation");
        return render_form(&state, "Create Book", &validated.form, &validated.errors).await;
    }

    let book = state
        .books()
        .insert(Book::from_form(&validated.form))
        .await?;
    tracing::info!(id = %book.id, "book created");
    Ok(redirect(&book.url()))
}

pub async fn book_update_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let book = state
        .books()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Book not found."))?;
    render_form(&state, "Update Book", &BookForm::from(&book.doc), &[]).await
}

pub async fn book_update_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
    Form(form): Form<BookForm>,
) -> HandlerResult {
    let validated = validate(form);

    if !validated.is_valid() {
        tracing::debug!(%id, errors = validated.errors.len(), "book update rejected by validation");
        return render_form(&state, "Update Book", &validated.form, &validated.errors).await;
    }

    let book = state
        .books()
        .replace(&id, Book::from_form(&validated.form))
        .await?
        .ok_or_else(|| AppError::not_found("Book not found."))?;
    tracing::info!(id = %book.id, "book updated");
    Ok(redirect(&book.url()))
}

pub async fn book_delete_get(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    match with_copies(&state, &id).await? {
        (Some(book), copies) => Ok(page(views::book::delete(&book, &copies))),
        (None, _) => Ok(redirect(LIST_URL)),
    }
}

pub async fn book_delete_post(
    State(state): State<CatalogState>,
    Path(id): Path<String>,
) -> HandlerResult {
    let (book, copies) = with_copies(&state, &id).await?;
    let Some(book) = book else {
        return Ok(redirect(LIST_URL));
    };

    if !copies.is_empty() {
        tracing::debug!(id = %book.id, copies = copies.len(), "book deletion blocked by copies");
        return Ok(page(views::book::delete(&book, &copies)));
    }

    state.books().delete(&book.id).await?;
    tracing::info!(id = %book.id, "book deleted");
    Ok(redirect(LIST_URL))
}
