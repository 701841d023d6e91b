use maud::{html, Markup};

use super::{error_list, layout, stored};
use crate::modules::catalog::models::{Book, Genre, GenreForm, Record};
use crate::modules::catalog::validation::FieldError;

pub fn list(genres: &[Record<Genre>]) -> Markup {
    layout(
        "Genre List",
        html! {
            h1 { "Genre List" }
            @if genres.is_empty() {
                p { "There are no genres." }
            } @else {
                ul {
                    @for genre in genres {
                        li { a href=(genre.url()) { (stored(&genre.name)) } }
                    }
                }
            }
        },
    )
}

pub fn detail(genre: &Record<Genre>, books: &[Record<Book>]) -> Markup {
    layout(
        "Genre Detail",
        html! {
            h1 { "Genre: " (stored(&genre.name)) }
            div style="margin-left:20px;margin-top:20px" {
                h4 { "Books" }
                @if books.is_empty() {
                    p { "This genre has no books." }
                } @else {
                    dl {
                        @for book in books {
                            dt { a href=(book.url()) { (stored(&book.title)) } }
                            dd { (stored(&book.summary)) }
                        }
                    }
                }
            }
            hr;
            p { a href={ (genre.url()) "/delete" } { "Delete genre" } }
            p { a href={ (genre.url()) "/update" } { "Update genre" } }
        },
    )
}

pub fn form(title: &str, form: &GenreForm, errors: &[FieldError]) -> Markup {
    layout(
        title,
        html! {
            h1 { (title) }
            form method="POST" {
                div.form-group {
                    label for="name" { "Genre:" }
                    input.form-control id="name" type="text" name="name"
                        placeholder="Fantasy, Poetry etc." value=(form.name) required;
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

/// Confirmation page; lists the books that block deletion when there are any
pub fn delete(genre: &Record<Genre>, books: &[Record<Book>]) -> Markup {
    layout(
        "Delete Genre",
        html! {
            h1 { "Delete Genre: " (stored(&genre.name)) }
            @if books.is_empty() {
                p { "Do you really want to delete this Genre?" }
                form method="POST" {
                    input type="hidden" name="genreid" value=(genre.id);
                    button.btn.btn-primary type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following books before attempting to delete this genre." } }
                div style="margin-left:20px;margin-top:20px" {
                    h4 { "Books" }
                    dl {
                        @for book in books {
                            dt { a href=(book.url()) { (stored(&book.title)) } }
                            dd { (stored(&book.summary)) }
                        }
                    }
                }
            }
        },
    )
}
