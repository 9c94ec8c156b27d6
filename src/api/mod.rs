//! Remote access split across logical submodules: plain-data HTTP types,
//! endpoint builders/parsers, and the `Remote` facade the UI talks to.

mod books;
mod feedback;
mod http;

#[cfg(test)]
pub(crate) mod testing;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Book, BookId, BookPayload, FeedbackSubmission};

pub use books::BookEndpoints;
pub use feedback::FeedbackEndpoint;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};

/// Every network operation the application performs. Each call is one
/// request, awaited to completion, with no retry.
pub struct Remote {
    books: BookEndpoints,
    feedback: FeedbackEndpoint,
    transport: Box<dyn Transport>,
}

impl Remote {
    pub fn new(config: &Config, transport: Box<dyn Transport>) -> Self {
        Self {
            books: BookEndpoints::new(&config.api_url),
            feedback: FeedbackEndpoint::new(&config.feedback_url),
            transport,
        }
    }

    pub fn list_books(&self) -> Result<Vec<Book>, ApiError> {
        let response = self.transport.send(&self.books.build_list())?;
        self.books.parse_list(response)
    }

    pub fn create_book(&self, payload: &BookPayload) -> Result<(), ApiError> {
        let request = self.books.build_create(payload)?;
        self.books.parse_mutation(self.transport.send(&request)?)
    }

    pub fn update_book(&self, id: &BookId, payload: &BookPayload) -> Result<(), ApiError> {
        let request = self.books.build_update(id, payload)?;
        self.books.parse_mutation(self.transport.send(&request)?)
    }

    pub fn delete_book(&self, id: &BookId) -> Result<(), ApiError> {
        let request = self.books.build_delete(id);
        self.books.parse_mutation(self.transport.send(&request)?)
    }

    pub fn send_feedback(&self, submission: &FeedbackSubmission) -> Result<(), ApiError> {
        let request = self.feedback.build_submit(submission)?;
        self.feedback.parse_submit(self.transport.send(&request)?)
    }
}
