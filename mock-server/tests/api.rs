use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Book, Db};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

#[tokio::test]
async fn list_starts_empty() {
    let resp = app()
        .oneshot(empty_request("GET", "/api/books"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let books: Vec<Book> = body_json(resp).await;
    assert!(books.is_empty());
}

#[tokio::test]
async fn create_assigns_increasing_ids() {
    let db = Db::default();
    for (expected, title) in [(1, "Dune"), (2, "Emma")] {
        let resp = app_with(db.clone())
            .oneshot(json_request(
                "POST",
                "/api/books/createOne",
                &format!(r#"{{"title":"{title}","author":"X","summary":""}}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let book: Book = body_json(resp).await;
        assert_eq!(book.id, expected);
    }

    let resp = app_with(db)
        .oneshot(empty_request("GET", "/api/books"))
        .await
        .unwrap();
    let books: Vec<Book> = body_json(resp).await;
    assert_eq!(books.len(), 2);
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let db = Db::default();
    app_with(db.clone())
        .oneshot(json_request(
            "POST",
            "/api/books/createOne",
            r#"{"title":"Dune","author":"Herbert","summary":"Spice"}"#,
        ))
        .await
        .unwrap();

    let resp = app_with(db)
        .oneshot(json_request(
            "PUT",
            "/api/books/updateOne/1",
            r#"{"title":"Dune Messiah","author":"Frank Herbert","summary":""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let book: Book = body_json(resp).await;
    assert_eq!(book.title, "Dune Messiah");
    assert_eq!(book.summary, "");
}

#[tokio::test]
async fn missing_ids_return_404() {
    let resp = app()
        .oneshot(json_request(
            "PUT",
            "/api/books/updateOne/9",
            r#"{"title":"a","author":"b","summary":""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app()
        .oneshot(empty_request("DELETE", "/api/books/deleteOne/9"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn feedback_is_recorded() {
    let db = Db::default();
    let resp = app_with(db.clone())
        .oneshot(json_request(
            "POST",
            "/feedback",
            r#"{"email":"a@b.c","message":"hi"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(db.read().await.feedback().len(), 1);
}
