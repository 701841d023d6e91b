use std::collections::HashSet;

use maud::{html, Markup};

use super::{error_list, layout, stored, text_field};
use crate::modules::catalog::models::{Author, Book, BookForm, BookInstance, Genre, Record, Status};
use crate::modules::catalog::validation::FieldError;

/// Reference lists and pre-selected identifiers for the book form
pub struct BookFormChoices<'a> {
    pub authors: &'a [Record<Author>],
    pub genres: &'a [Record<Genre>],
    pub selected_genres: &'a HashSet<String>,
}

pub fn list(books: &[(Record<Book>, Option<&Record<Author>>)]) -> Markup {
    layout(
        "Book List",
        html! {
            h1 { "Book List" }
            @if books.is_empty() {
                p { "There are no books." }
            } @else {
                ul {
                    @for (book, author) in books {
                        li {
                            a href=(book.url()) { (stored(&book.title)) }
                            @if let Some(author) = author {
                                " (" (stored(&author.name())) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

pub(super) fn status_badge(status: Status) -> Markup {
    let class = match status {
        Status::Available => "text-success",
        Status::Maintenance => "text-danger",
        Status::Loaned | Status::Reserved => "text-warning",
    };
    html! { span class=(class) { (status.as_str()) } }
}

pub fn detail(
    book: &Record<Book>,
    author: Option<&Record<Author>>,
    genres: &[Record<Genre>],
    copies: &[Record<BookInstance>],
) -> Markup {
    layout(
        "Book Detail",
        html! {
            h1 { "Title: " (stored(&book.title)) }
            p {
                strong { "Author: " }
                @match author {
                    Some(author) => a href=(author.url()) { (stored(&author.name())) },
                    None => "Unknown",
                }
            }
            p { strong { "Summary: " } (stored(&book.summary)) }
            p { strong { "ISBN: " } (stored(&book.isbn)) }
            p {
                strong { "Genre: " }
                @for (index, genre) in genres.iter().enumerate() {
                    a href=(genre.url()) { (stored(&genre.name)) }
                    @if index + 1 < genres.len() { ", " }
                }
            }
            div style="margin-left:20px;margin-top:20px" {
                h4 { "Copies" }
                @if copies.is_empty() {
                    p { "There are no copies of this book in the library." }
                }
                @for copy in copies {
                    hr;
                    p { (status_badge(copy.status)) }
                    p { strong { "Imprint: " } (stored(&copy.imprint)) }
                    @if copy.status != Status::Available {
                        p { strong { "Due back: " } (copy.due_back_formatted()) }
                    }
                    p { strong { "Id: " } a href=(copy.url()) { (copy.id) } }
                }
            }
            hr;
            p { a href={ (book.url()) "/delete" } { "Delete book" } }
            p { a href={ (book.url()) "/update" } { "Update book" } }
        },
    )
}

pub fn form(
    title: &str,
    form: &BookForm,
    choices: &BookFormChoices<'_>,
    errors: &[FieldError],
) -> Markup {
    layout(
        title,
        html! {
            h1 { (title) }
            form method="POST" {
                (text_field("title", "Title:", &form.title, "Name of book"))
                div.form-group {
                    label for="author" { "Author:" }
                    select.form-control id="author" name="author" required {
                        option value="" { "--Please select an author--" }
                        @for author in choices.authors {
                            option value=(author.id) selected[author.id == form.author] {
                                (stored(&author.name()))
                            }
                        }
                    }
                }
                div.form-group {
                    label for="summary" { "Summary:" }
                    textarea.form-control id="summary" name="summary" placeholder="Summary" required {
                        (form.summary)
                    }
                }
                (text_field("isbn", "ISBN:", &form.isbn, "ISBN13"))
                div.form-group {
                    label { "Genre:" }
                    div {
                        @for genre in choices.genres {
                            div style="display: inline; padding-right:10px;" {
                                input.checkbox-input type="checkbox" name="genre" id=(genre.id)
                                    value=(genre.id) checked[choices.selected_genres.contains(&genre.id)];
                                " "
                                label for=(genre.id) { (stored(&genre.name)) }
                            }
                        }
                    }
                }
                button.btn.btn-primary type="submit" { "Submit" }
            }
            (error_list(errors))
        },
    )
}

/// Confirmation page; lists the copies that block deletion when there are any
pub fn delete(book: &Record<Book>, copies: &[Record<BookInstance>]) -> Markup {
    layout(
        "Delete Book",
        html! {
            h1 { "Delete Book: " (stored(&book.title)) }
            p { strong { "Summary: " } (stored(&book.summary)) }
            @if copies.is_empty() {
                p { "Do you really want to delete this Book?" }
                form method="POST" {
                    input type="hidden" name="bookid" value=(book.id);
                    button.btn.btn-primary type="submit" { "Delete" }
                }
            } @else {
                p { strong { "Delete the following copies before attempting to delete this book." } }
                div style="margin-left:20px;margin-top:20px" {
                    h4 { "Copies" }
                    dl {
                        @for copy in copies {
                            dt { a href=(copy.url()) { (stored(&copy.imprint)) } }
                            dd { (status_badge(copy.status)) }
                        }
                    }
                }
            }
        },
    )
}
