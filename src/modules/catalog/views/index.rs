use maud::{html, Markup};

use super::layout;

/// Totals shown on the catalog home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogCounts {
    pub books: u64,
    pub book_instances: u64,
    pub book_instances_available: u64,
    pub authors: u64,
    pub genres: u64,
}

pub fn dashboard(counts: &CatalogCounts) -> Markup {
    layout(
        "Local Library Home",
        html! {
            h1 { "Local Library Home" }
            p { "Welcome to " em { "LocalLibrary" } ", a very basic website." }
            h2 { "Dynamic content" }
            p { "The library has the following record counts:" }
            ul {
                li { strong { "Books: " } (counts.books) }
                li { strong { "Copies: " } (counts.book_instances) }
                li { strong { "Copies available: " } (counts.book_instances_available) }
                li { strong { "Authors: " } (counts.authors) }
                li { strong { "Genres: " } (counts.genres) }
            }
        },
    )
}
