//! Domain models exchanged with the remote book API. The client never owns
//! these records: every `Book` is a copy rebuilt from the last successful
//! fetch, so the types stay plain data holders.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Server-assigned identifier. The API is free to send it as a JSON string
/// or number; we only ever echo it back into request paths, so it is kept as
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BookId(String);

impl BookId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BookId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => BookId(text),
            RawId::Number(number) => BookId(number.to_string()),
        })
    }
}

/// One book record as returned by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// `null`, missing and empty summaries are all treated as absent.
    #[serde(default)]
    pub summary: Option<String>,
}

impl Book {
    /// Summary text if the record carries a non-empty one. Whitespace is
    /// shown as-is.
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().filter(|summary| !summary.is_empty())
    }

    /// Payload that recreates this record's fields, used to seed the form
    /// when entering edit mode.
    pub fn to_payload(&self) -> BookPayload {
        BookPayload {
            title: self.title.clone(),
            author: self.author.clone(),
            summary: self.summary.clone().unwrap_or_default(),
        }
    }
}

/// JSON body for `createOne` and `updateOne`. An empty summary is sent as
/// `""`, matching what the form holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPayload {
    pub title: String,
    pub author: String,
    pub summary: String,
}

/// Two-field feedback form contents, alive for one submit call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackSubmission {
    pub email: String,
    pub message: String,
}
