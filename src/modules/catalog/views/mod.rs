//! HTML views for the catalog, rendered with maud.
//!
//! Entity text is stored HTML-escaped, so stored strings are emitted through
//! [`stored`] rather than escaped a second time. Form values are raw and go
//! through maud's normal escaping like everything else.

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod index;

use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::validation::FieldError;

const BOOTSTRAP_CSS: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@4.6.2/dist/css/bootstrap.min.css";

const STYLE: &str = r#"
.sidebar-nav { margin-top: 20px; padding: 0; list-style: none; }
.errors { color: #a94442; }
.form-group label { font-weight: 600; }
"#;

/// Emit text that was escaped by the validation pipeline
pub fn stored(text: &str) -> PreEscaped<&str> {
    PreEscaped(text)
}

/// Base document with sidebar navigation
pub fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (stored(title)) }
                link rel="stylesheet" href=(BOOTSTRAP_CSS);
                style { (PreEscaped(STYLE)) }
            }
            body {
                div.container-fluid {
                    div.row {
                        div.col-sm-2 {
                            ul.sidebar-nav {
                                li { a href="/catalog" { "Home" } }
                                li { a href="/catalog/books" { "All books" } }
                                li { a href="/catalog/authors" { "All authors" } }
                                li { a href="/catalog/genres" { "All genres" } }
                                li { a href="/catalog/bookinstances" { "All book-instances" } }
                                li { hr; }
                                li { a href="/catalog/author/create" { "Create new author" } }
                                li { a href="/catalog/genre/create" { "Create new genre" } }
                                li { a href="/catalog/book/create" { "Create new book" } }
                                li { a href="/catalog/bookinstance/create" { "Create new book instance (copy)" } }
                            }
                        }
                        div.col-sm-10 {
                            (content)
                        }
                    }
                }
            }
        }
    }
}

/// Validation messages shown above a re-rendered form
pub fn error_list(errors: &[FieldError]) -> Markup {
    html! {
        @if !errors.is_empty() {
            ul.errors {
                @for error in errors {
                    li { (error.message.as_str()) }
                }
            }
        }
    }
}

/// Single-line text input holding a submitted value
fn text_field(name: &str, label: &str, value: &str, placeholder: &str) -> Markup {
    html! {
        div.form-group {
            label for=(name) { (label) }
            input.form-control id=(name) type="text" name=(name) placeholder=(placeholder)
                value=(value) required;
        }
    }
}

/// Optional date input holding a submitted value
fn date_field(name: &str, label: &str, value: &str) -> Markup {
    html! {
        div.form-group {
            label for=(name) { (label) }
            input.form-control id=(name) type="date" name=(name) value=(value);
        }
    }
}
