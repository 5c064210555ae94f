//! Blocking `Transport` backed by ureq.

use std::time::Duration;

use tracing::debug;

use crate::config::ClientConfig;
use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse, Transport};

/// Executes requests with a shared `ureq::Agent`.
///
/// Status codes are never turned into errors here; 4xx/5xx come back as an
/// `HttpResponse` for the client to interpret. Default headers are sent on
/// every request after the request's own headers, which is how callers attach
/// credentials.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    default_headers: Vec<(String, String)>,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self::build(None)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::build(Some(timeout))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::build(config.timeout)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    fn build(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self {
            agent,
            default_headers: Vec::new(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.agent.get(&request.url);
        for (name, value) in request.headers.iter().chain(&self.default_headers) {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let mut response = builder
            .call()
            .map_err(|e| TransportError::with_source(format!("GET {} failed", request.url), e))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(|e| {
            TransportError::with_source(format!("reading body of {} failed", request.url), e)
        })?;
        debug!(status, bytes = body.len(), "ureq response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
