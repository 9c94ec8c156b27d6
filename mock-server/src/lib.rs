//! In-memory stand-in for the remote book API and the feedback endpoint,
//! used for local development and end-to-end tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

/// Mount point of the book collection, mirroring the hosted API.
pub const BOOKS_PATH: &str = "/api/books";
pub const FEEDBACK_PATH: &str = "/feedback";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub summary: String,
}

#[derive(Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feedback {
    pub email: String,
    pub message: String,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    books: BTreeMap<u64, Book>,
    feedback: Vec<Feedback>,
}

impl Store {
    pub fn feedback(&self) -> &[Feedback] {
        &self.feedback
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Db::default())
}

/// Router over a caller-owned store, so tests can inspect what was written.
pub fn app_with(db: Db) -> Router {
    Router::new()
        .route(BOOKS_PATH, get(list_books))
        .route(&format!("{BOOKS_PATH}/createOne"), post(create_book))
        .route(&format!("{BOOKS_PATH}/updateOne/{{id}}"), put(update_book))
        .route(&format!("{BOOKS_PATH}/deleteOne/{{id}}"), delete(delete_book))
        .route(FEEDBACK_PATH, post(submit_feedback))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(db)).await
}

async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    let store = db.read().await;
    Json(store.books.values().cloned().collect())
}

async fn create_book(
    State(db): State<Db>,
    Json(input): Json<BookInput>,
) -> (StatusCode, Json<Book>) {
    let mut store = db.write().await;
    store.next_id += 1;
    let book = Book {
        id: store.next_id,
        title: input.title,
        author: input.author,
        summary: input.summary,
    };
    store.books.insert(book.id, book.clone());
    (StatusCode::CREATED, Json(book))
}

async fn update_book(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<BookInput>,
) -> Result<Json<Book>, StatusCode> {
    let mut store = db.write().await;
    let book = store.books.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    book.title = input.title;
    book.author = input.author;
    book.summary = input.summary;
    Ok(Json(book.clone()))
}

async fn delete_book(State(db): State<Db>, Path(id): Path<u64>) -> StatusCode {
    let mut store = db.write().await;
    match store.books.remove(&id) {
        Some(_) => StatusCode::NO_CONTENT,
        None => StatusCode::NOT_FOUND,
    }
}

async fn submit_feedback(State(db): State<Db>, Json(input): Json<Feedback>) -> StatusCode {
    db.write().await.feedback.push(input);
    StatusCode::OK
}
