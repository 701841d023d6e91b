use garde::Validate;
use serde::{Deserialize, Serialize};

use super::Model;
use crate::modules::catalog::validation::{escape, required, unescape, CatalogForm};

/// Missing fields default so that projected documents still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    pub title: String,
    /// Author identifier
    pub author: String,
    pub summary: String,
    pub isbn: String,
    /// Genre identifiers
    pub genre: Vec<String>,
}

impl Model for Book {
    const COLLECTION: &'static str = "books";
    const ROUTE: &'static str = "book";
}

impl Book {
    pub fn from_form(form: &BookForm) -> Self {
        Self {
            title: escape(&form.title),
            author: escape(&form.author),
            summary: escape(&form.summary),
            isbn: escape(&form.isbn),
            genre: form.genre.iter().map(|id| escape(id)).collect(),
        }
    }
}

/// Book create/update form. Checked genres arrive as repeated `genre` keys;
/// none checked leaves the list empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(default)]
pub struct BookForm {
    #[garde(custom(required("Title must not be empty.")))]
    pub title: String,
    #[garde(custom(required("Author must not be empty.")))]
    pub author: String,
    #[garde(custom(required("Summary must not be empty.")))]
    pub summary: String,
    #[garde(custom(required("ISBN must not be empty.")))]
    pub isbn: String,
    #[garde(skip)]
    pub genre: Vec<String>,
}

impl CatalogForm for BookForm {
    fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            summary: self.summary.trim().to_string(),
            isbn: self.isbn.trim().to_string(),
            genre: self.genre,
        }
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: unescape(&book.title),
            author: unescape(&book.author),
            summary: unescape(&book.summary),
            isbn: unescape(&book.isbn),
            genre: book.genre.iter().map(|id| unescape(id)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projected_documents_decode_with_defaults() {
        let book: Book =
            serde_json::from_value(serde_json::json!({"title": "Dune", "author": "a1"})).unwrap();
        assert_eq!(book.title, "Dune");
        assert!(book.summary.is_empty());
        assert!(book.genre.is_empty());
    }

    #[test]
    fn repeated_genre_keys_deserialize_into_the_list() {
        let one: BookForm = serde_html_form::from_str("title=Dune&genre=g1").unwrap();
        assert_eq!(one.genre, ["g1"]);

        let two: BookForm = serde_html_form::from_str("genre=g1&title=Dune&genre=g2").unwrap();
        assert_eq!(two.genre, ["g1", "g2"]);

        let none: BookForm = serde_html_form::from_str("title=Dune&summary=").unwrap();
        assert!(none.genre.is_empty());
    }

    #[test]
    fn form_round_trip_preserves_fields() {
        let book = Book {
            title: escape("Mort & Co"),
            author: "a1".into(),
            summary: escape("A \"quoted\" <summary>"),
            isbn: "9780552131063".into(),
            genre: vec!["g1".into(), "g2".into()],
        };
        let form = BookForm::from(&book);
        assert_eq!(form.title, "Mort & Co");
        assert_eq!(form.summary, "A \"quoted\" <summary>");
        assert_eq!(Book::from_form(&form), book);
    }
}
