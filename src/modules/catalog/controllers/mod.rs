//! Request handlers, one family per entity.
//!
//! Every write handler ends in exactly one of two ways: the originating page
//! is re-rendered with diagnostics and the store is untouched, or the store
//! is changed and the client is redirected to a GET endpoint.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod index;

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use library_http::error::AppError;
use maud::Markup;

pub type HandlerResult = Result<Response, AppError>;

pub(crate) fn page(markup: Markup) -> Response {
    Html(markup.into_string()).into_response()
}

/// `302 Found` to a GET endpoint
pub(crate) fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
