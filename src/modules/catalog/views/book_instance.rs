use maud::{html, Markup};

use super::book::status_badge;
use super::{date_field, error_list, layout, stored, text_field};
use crate::modules::catalog::models::{Book, BookInstance, BookInstanceForm, Record, Status};
use crate::modules::catalog::validation::FieldError;

pub fn list(copies: &[(Record<BookInstance>, Option<&Record<Book>>)]) -> Markup {
    layout(
        "Book Instance List",
        html! {
            h1 { "Book Instance List" }
            @if copies.is_empty() {
                p { "There are no book copies in this library." }
            } @else {
                ul {
                    @for (copy, book) in copies {
                        li {
                            a href=(copy.url()) {
                                @match book {
                                    Some(book) => (stored(&book.title)),
                                    None => "Unknown book",
                                }
                                " : " (stored(&copy.imprint))
                            }
                            " - " (status_badge(copy.status))
                            @if copy.status != Status::Available {
                                " (Due: " (copy.due_back_formatted()) ")"
                            }
                        }
                    }
                }
            }
        },
    )
}

fn summary(copy: &Record<BookInstance>, book: Option<&Record<Book>>) -> Markup {
    html! {
        p {
            strong { "Title: " }
            @match book {
                Some(book) => a href=(book.url()) { (stored(&book.title)) },
                None => "Unknown book",
            }
        }
        p { strong { "Imprint: " } (stored(&copy.imprint)) }
        p { strong { "Status: " } (status_badge(copy.status)) }
        @if copy.status != Status::Available {
            p { strong { "Due back: " } (copy.due_back_formatted()) }
        }
    }
}

pub fn detail(copy: &Record<BookInstance>, book: Option<&Record<Book>>) -> Markup {
    layout(
        "Book Copy",
        html! {
            h1 { "ID: " (copy.id) }
            (summary(copy, book))
            hr;
            p { a href={ (copy.url()) "/delete" } { "Delete BookInstance" } }
            p { a href={ (copy.url()) "/update" } { "Update BookInstance" } }
        },
    )
}

pub fn form(
    title: &str,
    form: &BookInstanceForm,
    books: &[Record<Book>],
    errors: &[FieldError],
) -> Markup {
    layout(
        title,
        html! {
            h1 { (title) }
            form method="POST" {
                div.form-group {
                    label for="book" { "Book:" }
                    select.form-control id="book" name="book" required {
                        option value="" { "--Please select a book--" }
                        @for book in books {
                            option value=(book.id) selected[book.id == form.book] {
                                (stored(&book.title))
                            }
                        }
                    }
                }
                (text_field("imprint", "Imprint:", &form.imprint, "Publisher and date information"))
                (date_field("due_back", "Date when book available:", &form.due_back))
                div.form-group {
                    label for="status" { "Status:" }
                    select.form-control id="status" name="status" required {
                        option value="" { "--Please select a status--" }
                        @for status in Status::ALL {
                            option value=(status.as_str()) selected[status.as_str() == form.status] {
                                (status.as_str())
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

pub fn delete(copy: &Record<BookInstance>, book: Option<&Record<Book>>) -> Markup {
    layout(
        "Delete Copy",
        html! {
            h1 { "Delete BookInstance" }
            p { "Do you really want to delete this BookInstance?" }
            div style="margin-left:20px" {
                p { strong { "ID: " } (copy.id) }
                (summary(copy, book))
            }
            form method="POST" {
                input type="hidden" name="bookinstanceid" value=(copy.id);
                button.btn.btn-primary type="submit" { "Delete" }
            }
        },
    )
}
