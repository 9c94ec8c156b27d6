//! Terminal client for a remote book collection.
//!
//! The library exposes the pieces `main.rs` wires together so integration
//! tests can drive the same `App` against a local server.
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Network layer: the `Remote` facade and the transport it runs on.
pub use api::{Remote, Transport, UreqTransport};

pub use config::Config;
pub use error::{ApiError, ValidationError};

/// Domain types exchanged with the server.
pub use models::{Book, BookId, BookPayload, FeedbackSubmission};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
