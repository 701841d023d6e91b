//! Error handling for the catalog HTTP layer.
//!
//! Only failures that cannot be recovered inside a controller reach this
//! type: an identifier that does not resolve, or an unexpected store
//! failure. Validation failures and blocked deletions are re-rendered by the
//! controllers themselves and never become an `AppError`.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{html, DOCTYPE};
use once_cell::sync::OnceCell;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

static EXPOSE_DETAILS: OnceCell<bool> = OnceCell::new();

/// Decide once, at startup, whether internal error messages may be shown to
/// clients. Later calls are ignored.
pub fn expose_internal_details(expose: bool) {
    let _ = EXPOSE_DETAILS.set(expose);
}

fn exposes_internal_details() -> bool {
    *EXPOSE_DETAILS.get().unwrap_or(&cfg!(debug_assertions))
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_id = Uuid::now_v7();
        let timestamp = OffsetDateTime::now_utc();
        let status = self.status();

        let (message, detail) = match self {
            AppError::NotFound { message } => {
                tracing::info!(
                    error_id = %error_id,
                    status_code = %status.as_u16(),
                    %message,
                    "resource not found"
                );
                (message, None)
            }
            AppError::Internal(err) => {
                tracing::error!(
                    error_id = %error_id,
                    status_code = %status.as_u16(),
                    error = ?err,
                    "request failed"
                );
                let detail = exposes_internal_details().then(|| format!("{err:?}"));
                (err.to_string(), detail)
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR && detail.is_none() {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let page = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { "Error " (status.as_u16()) }
                }
                body {
                    h1 { (message) }
                    h2 { (status.as_u16()) " " (status.canonical_reason().unwrap_or("Error")) }
                    @if let Some(detail) = &detail {
                        pre { (detail) }
                    }
                    p.trace {
                        "Trace id " code { (error_id.to_string()) } " at " (timestamp.to_string())
                    }
                    p { a href="/catalog/" { "Back to the catalog" } }
                }
            }
        };

        (status, Html(page.into_string())).into_response()
    }
}
