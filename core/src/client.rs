//! Stateless request builder and response parser for the log entries API.
//!
//! # Design
//! `LogEntryClient` holds only a base URL. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; the one-shot methods run both around a
//! caller-supplied `Transport`. Nothing is retried and nothing is cached.

use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::query::{GetLogEntryOptions, ListLogEntriesOptions, QueryParams};
use crate::types::{ListLogEntryResponse, LogEntry, LogEntryEnvelope};

/// Media type pinning version 2 of the REST API.
pub const ACCEPT: &str = "application/vnd.pagerduty+json;version=2";

/// Synchronous, stateless client for the log entries endpoints.
#[derive(Debug, Clone)]
pub struct LogEntryClient {
    base_url: String,
}

impl LogEntryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_log_entries(
        &self,
        options: &ListLogEntriesOptions,
    ) -> Result<HttpRequest, ApiError> {
        self.build_get(&["log_entries"], options)
    }

    pub fn build_list_incident_log_entries(
        &self,
        incident_id: &str,
        options: &ListLogEntriesOptions,
    ) -> Result<HttpRequest, ApiError> {
        require_id("incident id", incident_id)?;
        self.build_get(&["incidents", incident_id, "log_entries"], options)
    }

    pub fn build_get_log_entry(
        &self,
        id: &str,
        options: &GetLogEntryOptions,
    ) -> Result<HttpRequest, ApiError> {
        require_id("log entry id", id)?;
        self.build_get(&["log_entries", id], options)
    }

    pub fn parse_list_log_entries(
        &self,
        response: HttpResponse,
    ) -> Result<ListLogEntryResponse, ApiError> {
        response.error_for_status()?;
        decode(&response.body)
    }

    /// Unwrap the `log_entry` envelope of a single-entity response.
    pub fn parse_get_log_entry(&self, response: HttpResponse) -> Result<LogEntry, ApiError> {
        response.error_for_status()?;
        let envelope: LogEntryEnvelope = decode(&response.body)?;
        envelope
            .log_entry()
            .ok_or(ApiError::MissingField(LogEntryEnvelope::KEY))
    }

    /// List log entries across the whole account.
    pub fn list_log_entries<T: Transport>(
        &self,
        transport: &T,
        options: &ListLogEntriesOptions,
    ) -> Result<ListLogEntryResponse, ApiError> {
        let request = self.build_list_log_entries(options)?;
        self.parse_list_log_entries(send(transport, &request)?)
    }

    /// List the log entries of one incident.
    pub fn list_incident_log_entries<T: Transport>(
        &self,
        transport: &T,
        incident_id: &str,
        options: &ListLogEntriesOptions,
    ) -> Result<ListLogEntryResponse, ApiError> {
        let request = self.build_list_incident_log_entries(incident_id, options)?;
        self.parse_list_log_entries(send(transport, &request)?)
    }

    pub fn get_log_entry<T: Transport>(
        &self,
        transport: &T,
        id: &str,
        options: &GetLogEntryOptions,
    ) -> Result<LogEntry, ApiError> {
        let request = self.build_get_log_entry(id, options)?;
        self.parse_get_log_entry(send(transport, &request)?)
    }

    fn build_get(
        &self,
        segments: &[&str],
        options: &impl QueryParams,
    ) -> Result<HttpRequest, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ApiError::EncodingError(format!("invalid base URL {}: {e}", self.base_url))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::EncodingError(format!("base URL {} cannot have a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        let query = options.to_query_string();
        url.set_query(Some(query.as_str()).filter(|q| !q.is_empty()));

        Ok(HttpRequest {
            url: url.into(),
            headers: vec![("accept".to_string(), ACCEPT.to_string())],
        })
    }
}

fn require_id(what: &str, id: &str) -> Result<(), ApiError> {
    if id.is_empty() {
        return Err(ApiError::EncodingError(format!("{what} must not be empty")));
    }
    Ok(())
}

fn send<T: Transport>(transport: &T, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
    debug!(url = %request.url, "GET");
    let response = transport.execute(request)?;
    debug!(url = %request.url, status = response.status, "response received");
    Ok(response)
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}
