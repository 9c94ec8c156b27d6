//! Error taxonomy for remote calls and form validation.
//!
//! Every `ApiError` is caught where the call is made and converted into a
//! toast, so none of these ever unwinds past the UI layer.

use thiserror::Error;

/// Failures of a single round-trip to the book API or feedback endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("request failed: {0}")]
    Network(String),

    /// The server answered with a non-2xx status. The body is kept for logs.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("could not encode request: {0}")]
    Encode(String),
}

/// Input rejected before any request is attempted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Both fields are required")]
    MissingBookFields,

    #[error("Email and message are required")]
    MissingFeedbackFields,
}
