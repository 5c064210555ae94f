//! Error types for the log entry client.
//!
//! # Design
//! Each stage of a call fails with its own variant so callers can tell them
//! apart: building the request (`EncodingError`), the network round-trip
//! (`TransportError`), the HTTP status (`NotFound`, `HttpError`), and the
//! response body (`DeserializationError`, `MissingField`). `MissingField`
//! means the body was valid JSON but lacked the envelope key, which points at
//! API contract drift rather than a broken connection.

use std::error::Error as StdError;

use thiserror::Error;

/// Errors returned by `LogEntryClient` build, parse and one-shot methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built from the given options.
    #[error("request encoding failed: {0}")]
    EncodingError(String),

    /// The transport failed before a response was received.
    #[error(transparent)]
    TransportError(#[from] TransportError),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The response was valid JSON but did not contain the envelope key.
    #[error("JSON response does not have {0} field")]
    MissingField(&'static str),
}

/// A network-level failure reported by a `Transport`.
///
/// Carries the transport's own message and, when available, the underlying
/// error so it can be inspected through `source()`.
#[derive(Debug, Error)]
#[error("transport failed: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
