use crate::error::ApiError;
use crate::models::{Book, BookId, BookPayload};

use super::http::{HttpMethod, HttpRequest, HttpResponse};

/// Builds requests for the book collection and parses its responses. Holds
/// only the base URL; the round-trip happens in a `Transport`.
#[derive(Debug, Clone)]
pub struct BookEndpoints {
    base_url: String,
}

impl BookEndpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `GET {base}`
    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.base_url.clone(),
            body: None,
        }
    }

    /// `POST {base}/createOne`
    pub fn build_create(&self, payload: &BookPayload) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/createOne", self.base_url),
            body: Some(encode(payload)?),
        })
    }

    /// `PUT {base}/updateOne/{id}`
    pub fn build_update(&self, id: &BookId, payload: &BookPayload) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/updateOne/{id}", self.base_url),
            body: Some(encode(payload)?),
        })
    }

    /// `DELETE {base}/deleteOne/{id}`
    pub fn build_delete(&self, id: &BookId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/deleteOne/{id}", self.base_url),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Book>, ApiError> {
        let response = response.error_for_status()?;
        serde_json::from_str(&response.body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    /// Create, update and delete are judged by status alone; whatever the
    /// server echoes back is ignored because the list is reloaded instead.
    pub fn parse_mutation(&self, response: HttpResponse) -> Result<(), ApiError> {
        response.error_for_status().map(|_| ())
    }
}

fn encode(payload: &BookPayload) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|err| ApiError::Encode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints() -> BookEndpoints {
        BookEndpoints::new("http://localhost:3000/api/books")
    }

    fn payload() -> BookPayload {
        BookPayload {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            summary: String::new(),
        }
    }

    #[test]
    fn list_is_a_get_on_the_base_url() {
        let req = endpoints().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/api/books");
        assert!(req.body.is_none());
    }

    #[test]
    fn create_posts_all_three_fields() {
        let req = endpoints().build_create(&payload()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/api/books/createOne");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Dune");
        assert_eq!(body["author"], "Frank Herbert");
        assert_eq!(body["summary"], "");
    }

    #[test]
    fn update_and_delete_put_the_id_in_the_path() {
        let id = BookId::new("42");
        let req = endpoints().build_update(&id, &payload()).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3000/api/books/updateOne/42");

        let req = endpoints().build_delete(&id);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3000/api/books/deleteOne/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_decodes_array() {
        let response = HttpResponse {
            status: 200,
            body: r#"[{"id":1,"title":"A","author":"B","summary":"C"}]"#.to_string(),
        };
        let books = endpoints().parse_list(response).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].summary_text(), Some("C"));
    }

    #[test]
    fn parse_list_rejects_error_status_even_with_valid_body() {
        let response = HttpResponse {
            status: 503,
            body: "[]".to_string(),
        };
        let err = endpoints().parse_list(response).unwrap_err();
        assert!(matches!(err, ApiError::Http { status: 503, .. }));
    }

    #[test]
    fn parse_list_reports_bad_json() {
        let response = HttpResponse {
            status: 200,
            body: "<html>".to_string(),
        };
        let err = endpoints().parse_list(response).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn mutation_succeeds_on_any_2xx() {
        for status in [200, 201, 204] {
            let response = HttpResponse {
                status,
                body: String::new(),
            };
            assert!(endpoints().parse_mutation(response).is_ok());
        }
        let response = HttpResponse {
            status: 404,
            body: String::new(),
        };
        assert!(endpoints().parse_mutation(response).is_err());
    }
}
