//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! Requests and responses are plain data. `LogEntryClient` builds
//! `HttpRequest` values and parses `HttpResponse` values without touching the
//! network; a `Transport` performs the round-trip in between. Every endpoint
//! this crate speaks to is a GET, so a request is just a URL and headers.
//!
//! Transports report non-success statuses as ordinary responses. Turning a
//! status into an error happens once, in `HttpResponse::error_for_status`.

use crate::error::{ApiError, TransportError};

/// An HTTP GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL including the encoded query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    /// Map a non-2xx status to the matching `ApiError`.
    pub fn error_for_status(&self) -> Result<(), ApiError> {
        if (200..300).contains(&self.status) {
            return Ok(());
        }
        if self.status == 404 {
            return Err(ApiError::NotFound);
        }
        Err(ApiError::HttpError {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

/// Executes an `HttpRequest` and returns the raw response.
///
/// Implementations must return 4xx/5xx responses as `Ok` and reserve `Err`
/// for failures where no response was received (DNS, connect, timeout).
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}
