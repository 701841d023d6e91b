//! End-to-end behaviour of the catalog screens, driven through the assembled
//! router against a fresh in-memory SQLite store.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use library_db::{DocumentStore, Filter, SqliteStore};
use library_kernel::settings::Settings;
use serde_json::json;
use tower::ServiceExt;

struct Harness {
    app: Router,
    store: Arc<SqliteStore>,
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

impl Harness {
    async fn new() -> Self {
        let store = Arc::new(SqliteStore::in_memory().await.unwrap());
        let registry = library_app::build_registry(store.clone());
        let app = library_http::build_router(&registry, &Settings::default());
        Self { app, store }
    }

    async fn send(&self, request: Request<Body>) -> Reply {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|value| value.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Reply {
            status,
            location,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }

    async fn get(&self, uri: &str) -> Reply {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn post(&self, uri: &str, form: &str) -> Reply {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn count(&self, collection: &str) -> u64 {
        self.store.count(collection, &Filter::all()).await.unwrap()
    }

    async fn seed(&self, collection: &str, body: serde_json::Value) -> String {
        self.store.insert(collection, body).await.unwrap()
    }
}

fn id_from(location: &str) -> &str {
    location.rsplit('/').next().unwrap()
}

#[tokio::test]
async fn site_root_redirects_to_catalog_home() {
    let h = Harness::new().await;
    let reply = h.get("/").await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location.as_deref(), Some("/catalog/"));
}

#[tokio::test]
async fn dashboard_shows_record_counts() {
    let h = Harness::new().await;
    let book = h
        .seed("books", json!({"title": "Dune", "author": "a1", "summary": "s", "isbn": "1", "genre": []}))
        .await;
    h.seed("bookinstances", json!({"book": book, "imprint": "Ace 1965", "status": "Available"}))
        .await;
    h.seed("bookinstances", json!({"book": book, "imprint": "Ace 1990", "status": "Loaned"}))
        .await;

    let reply = h.get("/catalog/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("<strong>Books: </strong>1"));
    assert!(reply.body.contains("<strong>Copies: </strong>2"));
    assert!(reply.body.contains("<strong>Copies available: </strong>1"));
    assert!(reply.body.contains("<strong>Genres: </strong>0"));
}

#[tokio::test]
async fn genre_create_is_case_insensitively_unique() {
    let h = Harness::new().await;

    let first = h.post("/catalog/genre/create", "name=Fantasy").await;
    assert_eq!(first.status, StatusCode::FOUND);
    let location = first.location.unwrap();
    assert!(location.starts_with("/catalog/genre/"));

    let second = h.post("/catalog/genre/create", "name=fantasy").await;
    assert_eq!(second.status, StatusCode::FOUND);
    assert_eq!(second.location.as_deref(), Some(location.as_str()));
    assert_eq!(h.count("genres").await, 1);
}

#[tokio::test]
async fn short_genre_name_is_rejected() {
    let h = Harness::new().await;
    let reply = h.post("/catalog/genre/create", "name=++ab++").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply
        .body
        .contains("Genre name must contain at least 3 characters"));
    assert_eq!(h.count("genres").await, 0);
}

#[tokio::test]
async fn missing_required_fields_leave_store_untouched() {
    let h = Harness::new().await;

    let reply = h
        .post("/catalog/author/create", "first_name=&family_name=Tolkien")
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("First name must be specified."));
    assert!(reply.body.contains("value=\"Tolkien\""));
    assert_eq!(h.count("authors").await, 0);

    let reply = h
        .post("/catalog/book/create", "title=&author=a1&summary=s&isbn=123")
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Title must not be empty."));
    assert_eq!(h.count("books").await, 0);

    let reply = h
        .post("/catalog/bookinstance/create", "book=b1&imprint=&status=Available")
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Imprint must be specified"));
    assert_eq!(h.count("bookinstances").await, 0);
}

#[tokio::test]
async fn invalid_author_dates_are_reported() {
    let h = Harness::new().await;
    let reply = h
        .post(
            "/catalog/author/create",
            "first_name=Ada&family_name=Lovelace&date_of_birth=not-a-date&date_of_death=1852-11-27",
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Invalid date of birth"));
    assert!(!reply.body.contains("Invalid date of death"));
    assert_eq!(h.count("authors").await, 0);
}

#[tokio::test]
async fn created_author_round_trips_escaped() {
    let h = Harness::new().await;
    let reply = h
        .post(
            "/catalog/author/create",
            "first_name=%3Cb%3EMary%3C%2Fb%3E&family_name=Shelley&date_of_birth=1797-08-30",
        )
        .await;
    assert_eq!(reply.status, StatusCode::FOUND);
    let location = reply.location.unwrap();

    let detail = h.get(&location).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("&lt;b&gt;Mary&lt;"));
    assert!(!detail.body.contains("<b>Mary"));
    assert!(!detail.body.contains("&amp;lt;"));
    assert!(detail.body.contains("Aug 30, 1797"));

    let update = h.get(&format!("{location}/update")).await;
    assert!(update.body.contains("value=\"&lt;b&gt;Mary&lt;/b&gt;\""));
}

#[tokio::test]
async fn day_first_dates_are_stored() {
    let h = Harness::new().await;
    let reply = h
        .post(
            "/catalog/author/create",
            "first_name=Ada&family_name=Lovelace&date_of_birth=10%2F12%2F1815",
        )
        .await;
    assert_eq!(reply.status, StatusCode::FOUND);
    let location = reply.location.unwrap();

    let stored = h.store.get("authors", id_from(&location)).await.unwrap().unwrap();
    assert_eq!(stored.body["date_of_birth"], "1815-12-10");
    let detail = h.get(&location).await;
    assert!(detail.body.contains("Dec 10, 1815"));

    let book = h
        .seed("books", json!({"title": "Notes", "author": "a1", "summary": "s", "isbn": "1", "genre": []}))
        .await;
    let form = format!("book={book}&imprint=Taylor&status=Loaned&due_back=01%2F11%2F2026");
    let reply = h.post("/catalog/bookinstance/create", &form).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    let detail = h.get(&reply.location.unwrap()).await;
    assert!(detail.body.contains("Nov 1, 2026"));
}

#[tokio::test]
async fn single_genre_selection_is_stored_as_list() {
    let h = Harness::new().await;
    let author = h
        .seed("authors", json!({"first_name": "Frank", "family_name": "Herbert"}))
        .await;
    let genre = h.seed("genres", json!({"name": "Science Fiction"})).await;

    let form = format!("title=Dune&author={author}&summary=Spice&isbn=9780441013593&genre={genre}");
    let reply = h.post("/catalog/book/create", &form).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    let location = reply.location.unwrap();

    let stored = h.store.get("books", id_from(&location)).await.unwrap().unwrap();
    assert_eq!(stored.body["genre"], json!([genre]));

    let detail = h.get(&location).await;
    assert!(detail.body.contains("Science Fiction"));
    assert!(detail.body.contains("Frank Herbert"));
    assert!(detail.body.contains("9780441013593"));
}

#[tokio::test]
async fn rejected_book_form_keeps_selected_genres() {
    let h = Harness::new().await;
    let fantasy = h.seed("genres", json!({"name": "Fantasy"})).await;
    let poetry = h.seed("genres", json!({"name": "Poetry"})).await;

    let form = format!("title=&author=&summary=&isbn=&genre={fantasy}&genre={poetry}");
    let reply = h.post("/catalog/book/create", &form).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body.matches("checked").count(), 2);
    assert_eq!(h.count("books").await, 0);
}

#[tokio::test]
async fn book_with_copies_cannot_be_deleted() {
    let h = Harness::new().await;
    let book = h
        .seed("books", json!({"title": "Emma", "author": "a1", "summary": "s", "isbn": "1", "genre": []}))
        .await;
    let copy = h
        .seed("bookinstances", json!({"book": book, "imprint": "Penguin 2003", "status": "Available"}))
        .await;

    let uri = format!("/catalog/book/{book}/delete");
    let reply = h.post(&uri, "").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Penguin 2003"));
    assert_eq!(h.count("books").await, 1);
    assert_eq!(h.count("bookinstances").await, 1);

    let reply = h
        .post(&format!("/catalog/bookinstance/{copy}/delete"), "")
        .await;
    assert_eq!(reply.location.as_deref(), Some("/catalog/bookinstances"));

    let reply = h.post(&uri, "").await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location.as_deref(), Some("/catalog/books"));
    assert_eq!(h.count("books").await, 0);
}

#[tokio::test]
async fn genre_and_author_with_books_cannot_be_deleted() {
    let h = Harness::new().await;
    let author = h
        .seed("authors", json!({"first_name": "Jane", "family_name": "Austen"}))
        .await;
    let genre = h.seed("genres", json!({"name": "Romance"})).await;
    h.seed(
        "books",
        json!({"title": "Persuasion", "author": author, "summary": "s", "isbn": "1", "genre": [genre]}),
    )
    .await;

    let reply = h.post(&format!("/catalog/genre/{genre}/delete"), "").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Persuasion"));

    let reply = h.post(&format!("/catalog/author/{author}/delete"), "").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Persuasion"));

    assert_eq!(h.count("genres").await, 1);
    assert_eq!(h.count("authors").await, 1);
}

#[tokio::test]
async fn deleting_without_dependents_removes_only_that_record() {
    let h = Harness::new().await;
    let keep = h.seed("genres", json!({"name": "Horror"})).await;
    let drop = h.seed("genres", json!({"name": "Western"})).await;

    let reply = h.post(&format!("/catalog/genre/{drop}/delete"), "").await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location.as_deref(), Some("/catalog/genres"));
    assert_eq!(h.count("genres").await, 1);
    assert!(h.store.get("genres", &keep).await.unwrap().is_some());
}

#[tokio::test]
async fn unknown_identifiers() {
    let h = Harness::new().await;
    for entity in ["book", "author", "genre", "bookinstance"] {
        let detail = h.get(&format!("/catalog/{entity}/missing")).await;
        assert_eq!(detail.status, StatusCode::NOT_FOUND, "{entity} detail");

        let update = h.get(&format!("/catalog/{entity}/missing/update")).await;
        assert_eq!(update.status, StatusCode::NOT_FOUND, "{entity} update");

        let delete = h.get(&format!("/catalog/{entity}/missing/delete")).await;
        assert_eq!(delete.status, StatusCode::FOUND, "{entity} delete");
        assert_eq!(delete.location, Some(format!("/catalog/{entity}s")));
    }
}

#[tokio::test]
async fn update_of_vanished_record_is_not_found() {
    let h = Harness::new().await;
    let reply = h
        .post("/catalog/genre/missing/update", "name=Mystery")
        .await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(h.count("genres").await, 0);
}

#[tokio::test]
async fn update_preserves_identifier() {
    let h = Harness::new().await;
    let id = h.seed("genres", json!({"name": "Poetry"})).await;

    let reply = h
        .post(&format!("/catalog/genre/{id}/update"), "name=Verse")
        .await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location, Some(format!("/catalog/genre/{id}")));

    let stored = h.store.get("genres", &id).await.unwrap().unwrap();
    assert_eq!(stored.body["name"], "Verse");
    assert_eq!(h.count("genres").await, 1);
}

#[tokio::test]
async fn genre_rename_onto_another_genre_is_refused() {
    let h = Harness::new().await;
    h.seed("genres", json!({"name": "Poetry"})).await;
    let id = h.seed("genres", json!({"name": "Drama"})).await;

    let reply = h
        .post(&format!("/catalog/genre/{id}/update"), "name=POETRY")
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Genre already exists"));

    let stored = h.store.get("genres", &id).await.unwrap().unwrap();
    assert_eq!(stored.body["name"], "Drama");
}

#[tokio::test]
async fn author_update_missing_name_is_not_persisted() {
    let h = Harness::new().await;
    let id = h
        .seed("authors", json!({"first_name": "Jane", "family_name": "Austen"}))
        .await;

    let reply = h
        .post(&format!("/catalog/author/{id}/update"), "first_name=Janet&family_name=++")
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Family name must be specified."));
    assert!(reply.body.contains("value=\"Janet\""));

    let stored = h.store.get("authors", &id).await.unwrap().unwrap();
    assert_eq!(stored.body["first_name"], "Jane");
    assert_eq!(stored.body["family_name"], "Austen");
}

#[tokio::test]
async fn book_update_missing_title_is_not_persisted() {
    let h = Harness::new().await;
    let id = h
        .seed("books", json!({"title": "Emma", "author": "a1", "summary": "s", "isbn": "1", "genre": ["g1"]}))
        .await;

    let reply = h
        .post(
            &format!("/catalog/book/{id}/update"),
            "title=&author=a1&summary=s&isbn=1&genre=g1",
        )
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Title must not be empty."));

    let stored = h.store.get("books", &id).await.unwrap().unwrap();
    assert_eq!(stored.body["title"], "Emma");
    assert_eq!(stored.body["genre"], json!(["g1"]));
}

#[tokio::test]
async fn unchecking_every_genre_clears_the_list() {
    let h = Harness::new().await;
    let genre = h.seed("genres", json!({"name": "Romance"})).await;
    let id = h
        .seed("books", json!({"title": "Emma", "author": "a1", "summary": "s", "isbn": "1", "genre": [genre]}))
        .await;

    let reply = h
        .post(
            &format!("/catalog/book/{id}/update"),
            "title=Emma&author=a1&summary=s&isbn=1",
        )
        .await;
    assert_eq!(reply.status, StatusCode::FOUND);
    assert_eq!(reply.location, Some(format!("/catalog/book/{id}")));

    let stored = h.store.get("books", &id).await.unwrap().unwrap();
    assert_eq!(stored.body["genre"], json!([]));
}

#[tokio::test]
async fn book_update_form_shows_stored_values_once_escaped() {
    let h = Harness::new().await;
    let author = h
        .seed("authors", json!({"first_name": "Terry", "family_name": "Pratchett"}))
        .await;
    let fantasy = h.seed("genres", json!({"name": "Fantasy"})).await;
    h.seed("genres", json!({"name": "Poetry"})).await;

    let form = format!(
        "title=Mort+%26+Co&author={author}&summary=Death%27s+%3Capprentice%3E&isbn=978&genre={fantasy}"
    );
    let reply = h.post("/catalog/book/create", &form).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    let location = reply.location.unwrap();

    let stored = h.store.get("books", id_from(&location)).await.unwrap().unwrap();
    assert_eq!(stored.body["title"], "Mort &amp; Co");

    let detail = h.get(&location).await;
    assert!(detail.body.contains("Mort &amp; Co"));
    assert!(!detail.body.contains("&amp;amp;"));

    let update = h.get(&format!("{location}/update")).await;
    assert_eq!(update.status, StatusCode::OK);
    assert!(update.body.contains("value=\"Mort &amp; Co\""));
    assert!(update.body.contains("&lt;apprentice&gt;"));
    assert!(!update.body.contains("&amp;amp;"));
    assert!(update
        .body
        .contains(&format!("<option value=\"{author}\" selected>")));
    assert_eq!(update.body.matches("checked").count(), 1);
}

#[tokio::test]
async fn genre_update_form_shows_current_name() {
    let h = Harness::new().await;
    let reply = h.post("/catalog/genre/create", "name=Sci-Fi+%26+Fantasy").await;
    let location = reply.location.unwrap();

    let update = h.get(&format!("{location}/update")).await;
    assert!(update.body.contains("value=\"Sci-Fi &amp; Fantasy\""));

    let reply = h
        .post(&format!("{location}/update"), "name=Sci-Fi+%26+Fantasy")
        .await;
    assert_eq!(reply.status, StatusCode::FOUND);
    let stored = h.store.get("genres", id_from(&location)).await.unwrap().unwrap();
    assert_eq!(stored.body["name"], "Sci-Fi &amp; Fantasy");
}

#[tokio::test]
async fn copy_round_trips_through_update_form() {
    let h = Harness::new().await;
    let book = h
        .seed("books", json!({"title": "Dracula", "author": "a1", "summary": "s", "isbn": "1", "genre": []}))
        .await;
    let form = format!("book={book}&imprint=Constable+%26+Co&status=Reserved&due_back=1897-05-26");
    let reply = h.post("/catalog/bookinstance/create", &form).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    let location = reply.location.unwrap();

    let update = h.get(&format!("{location}/update")).await;
    assert!(update.body.contains("value=\"Constable &amp; Co\""));
    assert!(update.body.contains("value=\"1897-05-26\""));
    assert!(update.body.contains("<option value=\"Reserved\" selected>"));

    let reply = h.post(&format!("{location}/update"), &form).await;
    assert_eq!(reply.status, StatusCode::FOUND);
    let stored = h.store.get("bookinstances", id_from(&location)).await.unwrap().unwrap();
    assert_eq!(stored.body["imprint"], "Constable &amp; Co");
    assert_eq!(stored.body["status"], "Reserved");
    assert_eq!(h.count("bookinstances").await, 1);
}

#[tokio::test]
async fn invalid_copy_update_is_not_persisted() {
    let h = Harness::new().await;
    let book = h
        .seed("books", json!({"title": "Ulysses", "author": "a1", "summary": "s", "isbn": "1", "genre": []}))
        .await;
    let copy = h
        .seed("bookinstances", json!({"book": book, "imprint": "Bodley Head", "status": "Available"}))
        .await;

    let form = format!("book={book}&imprint=Changed&status=Lost");
    let reply = h
        .post(&format!("/catalog/bookinstance/{copy}/update"), &form)
        .await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Status must be one of"));

    let stored = h.store.get("bookinstances", &copy).await.unwrap().unwrap();
    assert_eq!(stored.body["imprint"], "Bodley Head");
    assert_eq!(stored.body["status"], "Available");
}

#[tokio::test]
async fn copy_update_form_preselects_current_book() {
    let h = Harness::new().await;
    let book = h
        .seed("books", json!({"title": "Middlemarch", "author": "a1", "summary": "s", "isbn": "1", "genre": []}))
        .await;
    let copy = h
        .seed("bookinstances", json!({"book": book, "imprint": "Blackwood", "status": "Loaned", "due_back": "2026-11-01"}))
        .await;

    let reply = h.get(&format!("/catalog/bookinstance/{copy}/update")).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply
        .body
        .contains(&format!("<option value=\"{book}\" selected>")));
    assert!(reply.body.contains("value=\"2026-11-01\""));
}

#[tokio::test]
async fn lists_are_sorted() {
    let h = Harness::new().await;
    h.seed("genres", json!({"name": "Western"})).await;
    h.seed("genres", json!({"name": "Horror"})).await;

    let reply = h.get("/catalog/genres").await;
    let horror = reply.body.find("Horror").unwrap();
    let western = reply.body.find("Western").unwrap();
    assert!(horror < western);
}

#[tokio::test]
async fn unmatched_paths_render_not_found_page() {
    let h = Harness::new().await;
    let reply = h.get("/catalog/nowhere/at/all").await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert!(reply.body.contains("404"));
}
