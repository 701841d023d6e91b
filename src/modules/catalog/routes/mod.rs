//! URL table for the catalog.
//!
//! Each entity gets the same eight routes. Within a family the literal
//! `create` paths are registered before the `{id}` paths, and the table keeps
//! registration order so `library-cli routes` prints what the server mounts.

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use library_kernel::RouteInfo;

use super::controllers::{author, book, book_instance, genre, index};
use super::CatalogState;

/// Router under construction plus the matching route table
pub struct CatalogRoutes {
    router: Router<CatalogState>,
    table: Vec<RouteInfo>,
}

impl CatalogRoutes {
    fn new() -> Self {
        Self {
            router: Router::new(),
            table: Vec::new(),
        }
    }

    fn add(
        mut self,
        method: &'static str,
        path: &'static str,
        operation: &'static str,
        route: MethodRouter<CatalogState>,
    ) -> Self {
        self.table.push(RouteInfo {
            method,
            path,
            operation,
        });
        self.router = self.router.route(path, route);
        self
    }

    pub fn into_router(self, state: CatalogState) -> Router {
        self.router.with_state(state)
    }

    pub fn into_table(self) -> Vec<RouteInfo> {
        self.table
    }
}

/// Every catalog route, in registration order
pub fn catalog_routes() -> CatalogRoutes {
    CatalogRoutes::new()
        .add("GET", "/", "root", get(index::root))
        .add("GET", "/catalog", "index", get(index::index))
        .add("GET", "/catalog/", "index", get(index::index))
        // books
        .add("GET", "/catalog/book/create", "book_create_get", get(book::book_create_get))
        .add("POST", "/catalog/book/create", "book_create_post", post(book::book_create_post))
        .add("GET", "/catalog/book/{id}/delete", "book_delete_get", get(book::book_delete_get))
        .add("POST", "/catalog/book/{id}/delete", "book_delete_post", post(book::book_delete_post))
        .add("GET", "/catalog/book/{id}/update", "book_update_get", get(book::book_update_get))
        .add("POST", "/catalog/book/{id}/update", "book_update_post", post(book::book_update_post))
        .add("GET", "/catalog/book/{id}", "book_detail", get(book::book_detail))
        .add("GET", "/catalog/books", "book_list", get(book::book_list))
        // authors
        .add("GET", "/catalog/author/create", "author_create_get", get(author::author_create_get))
        .add("POST", "/catalog/author/create", "author_create_post", post(author::author_create_post))
        .add("GET", "/catalog/author/{id}/delete", "author_delete_get", get(author::author_delete_get))
        .add("POST", "/catalog/author/{id}/delete", "author_delete_post", post(author::author_delete_post))
        .add("GET", "/catalog/author/{id}/update", "author_update_get", get(author::author_update_get))
        .add("POST", "/catalog/author/{id}/update", "author_update_post", post(author::author_update_post))
        .add("GET", "/catalog/author/{id}", "author_detail", get(author::author_detail))
        .add("GET", "/catalog/authors", "author_list", get(author::author_list))
        // genres
        .add("GET", "/catalog/genre/create", "genre_create_get", get(genre::genre_create_get))
        .add("POST", "/catalog/genre/create", "genre_create_post", post(genre::genre_create_post))
        .add("GET", "/catalog/genre/{id}/delete", "genre_delete_get", get(genre::genre_delete_get))
        .add("POST", "/catalog/genre/{id}/delete", "genre_delete_post", post(genre::genre_delete_post))
        .add("GET", "/catalog/genre/{id}/update", "genre_update_get", get(genre::genre_update_get))
        .add("POST", "/catalog/genre/{id}/update", "genre_update_post", post(genre::genre_update_post))
        .add("GET", "/catalog/genre/{id}", "genre_detail", get(genre::genre_detail))
        .add("GET", "/catalog/genres", "genre_list", get(genre::genre_list))
        // book copies
        .add(
            "GET",
            "/catalog/bookinstance/create",
            "book_instance_create_get",
            get(book_instance::book_instance_create_get),
        )
        .add(
            "POST",
            "/catalog/bookinstance/create",
            "book_instance_create_post",
            post(book_instance::book_instance_create_post),
        )
        .add(
            "GET",
            "/catalog/bookinstance/{id}/delete",
            "book_instance_delete_get",
            get(book_instance::book_instance_delete_get),
        )
        .add(
            "POST",
            "/catalog/bookinstance/{id}/delete",
            "book_instance_delete_post",
            post(book_instance::book_instance_delete_post),
        )
        .add(
            "GET",
            "/catalog/bookinstance/{id}/update",
            "book_instance_update_get",
            get(book_instance::book_instance_update_get),
        )
        .add(
            "POST",
            "/catalog/bookinstance/{id}/update",
            "book_instance_update_post",
            post(book_instance::book_instance_update_post),
        )
        .add(
            "GET",
            "/catalog/bookinstance/{id}",
            "book_instance_detail",
            get(book_instance::book_instance_detail),
        )
        .add(
            "GET",
            "/catalog/bookinstances",
            "book_instance_list",
            get(book_instance::book_instance_list),
        )
}
