use maud::{html, Markup};

use super::{date_field, error_list, layout, stored, text_field};
use crate::modules::catalog::models::{Author, Book, Record};
use crate::modules::catalog::models::AuthorForm;
use crate::modules::catalog::validation::FieldError;

pub fn list(authors: &[Record<Author>]) -> Markup {
    layout(
        "Author List",
        html! {
            h1 { "Author List" }
            @if authors.is_empty() {
                p { "There are no authors." }
            } @else {
                ul {
                    @for author in authors {
                        li {
                            a href=(author.url()) { (stored(&author.name())) }
                            " (" (author.lifespan()) ")"
                        }
                    }
                }
            }
        },
    )
}

fn book_list(books: &[Record<Book>]) -> Markup {
    html! {
        dl {
            @for book in books {
                dt { a href=(book.url()) { (stored(&book.title)) } }
                dd { (stored(&book.summary)) }
            }
        }
    }
}

pub fn detail(author: &Record<Author>, books: &[Record<Book>]) -> Markup {
    layout(
        "Author Detail",
        html! {
            h1 { "Author: " (stored(&author.name())) }
            p { (author.lifespan()) }
            div style="margin-left:20px;margin-top:20px" {
                h4 { "Books" }
                @if books.is_empty() {
                    p { "This author has no books." }
                } @else {
                    (book_list(books))
                }
            }
            hr;
            p { a href={ (author.url()) "/delete" } { "Delete author" } }
            p { a href={ (author.url()) "/update" } { "Update author" } }
        },
    )
}

pub fn form(title: &str, form: &AuthorForm, errors: &[FieldError]) -> Markup {
    layout(
        title,
        html! {
            h1 { (title) }
            form method="POST" {
                (text_field("first_name", "First Name:", &form.first_name, "First name"))
                (text_field("family_name", "Family Name:", &form.family_name, "Family name"))
                (date_field("date_of_birth", "Date of birth:", &form.date_of_birth))
                (date_field("date_of_death", "Date of death:", &form.date_of_death))
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

/// Confirmation page; lists the books that block deletion when there are any
pub fn delete(author: &Record<Author>, books: &[Record<Book>]) -> Markup {
    layout(
        "Delete Author",
        html! {
            h1 { "Delete Author: " (stored(&author.name())) }
            p { (author.lifespan()) }
            @if books.is_empty() {
                p { "Do you really want to delete this Author?" }
                form method="POST" {
                    input type="hidden" name="authorid" value=(author.id);
                    button.btn.btn-primary type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following books before attempting to delete this author." } }
                div style="margin-left:20px;margin-top:20px" {
                    h4 { "Books" }
                    (book_list(books))
                }
            }
        },
    )
}
