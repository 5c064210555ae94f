//! Synchronous client core for the log entries slice of the PagerDuty REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` performs the
//! round-trip; `UreqTransport` is the blocking default.
//!
//! # Design
//! - `LogEntryClient` is stateless: it holds only the base URL.
//! - Every operation is a `build_*` / `parse_*` pair plus a one-shot method
//!   that runs both around a transport.
//! - Options encode to query strings through `QueryParams`; empty fields are
//!   omitted and relation expansions use repeated `include[]` pairs.
//! - Single-entity responses decode into `LogEntryEnvelope`, so a missing
//!   `log_entry` key surfaces as `ApiError::MissingField`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use client::LogEntryClient;
pub use config::ClientConfig;
pub use error::{ApiError, TransportError};
pub use http::{HttpRequest, HttpResponse, Transport};
pub use query::{GetLogEntryOptions, ListLogEntriesOptions, LogEntryInclude, QueryParams};
pub use transport::UreqTransport;
pub use types::{
    Agent, ApiObject, Channel, Context, Incident, ListLogEntryResponse, LogEntry,
    LogEntryEnvelope, Team,
};
