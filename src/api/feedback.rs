use crate::error::ApiError;
use crate::models::FeedbackSubmission;

use super::http::{HttpMethod, HttpRequest, HttpResponse};

/// Fixed third-party endpoint that accepts `{email, message}`.
#[derive(Debug, Clone)]
pub struct FeedbackEndpoint {
    url: String,
}

impl FeedbackEndpoint {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    pub fn build_submit(&self, submission: &FeedbackSubmission) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(submission).map_err(|err| ApiError::Encode(err.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.url.clone(),
            body: Some(body),
        })
    }

    pub fn parse_submit(&self, response: HttpResponse) -> Result<(), ApiError> {
        response.error_for_status().map(|_| ())
    }
}
