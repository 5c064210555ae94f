use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub const DEFAULT_LIMIT: usize = 25;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Reference {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
    pub created_at: String,
    pub agent: Reference,
    pub channel: Value,
    pub incident: Reference,
    #[serde(default)]
    pub teams: Vec<Reference>,
    #[serde(default)]
    pub contexts: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgement_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub event_details: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse {
    pub offset: usize,
    pub limit: usize,
    pub more: bool,
    pub total: Option<usize>,
    pub log_entries: Vec<LogEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub log_entry: LogEntry,
}

/// Entries ordered newest first, the order the list endpoints return.
pub type Db = Arc<RwLock<Vec<LogEntry>>>;

/// Query parameters understood by the list endpoints.
#[derive(Debug, Default, PartialEq)]
pub struct ListQuery {
    pub offset: usize,
    pub limit: usize,
    pub total: bool,
    pub since: Option<String>,
    pub until: Option<String>,
    pub is_overview: bool,
    pub includes: Vec<String>,
}

impl ListQuery {
    /// Collects repeated pairs such as `include[]`; unparseable numbers are a 400.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, StatusCode> {
        let mut query = ListQuery {
            limit: DEFAULT_LIMIT,
            ..Default::default()
        };
        for (key, value) in pairs {
            match key.as_str() {
                "offset" => query.offset = value.parse().map_err(|_| StatusCode::BAD_REQUEST)?,
                "limit" => query.limit = value.parse().map_err(|_| StatusCode::BAD_REQUEST)?,
                "total" => query.total = value == "true",
                "since" => query.since = Some(value.clone()),
                "until" => query.until = Some(value.clone()),
                "is_overview" => query.is_overview = value == "true",
                "include[]" => query.includes.push(value.clone()),
                _ => {}
            }
        }
        Ok(query)
    }

    fn matches(&self, entry: &LogEntry) -> bool {
        if self.is_overview && entry.kind == "notify_log_entry" {
            return false;
        }
        if let Some(since) = &self.since {
            if entry.created_at.as_str() < since.as_str() {
                return false;
            }
        }
        if let Some(until) = &self.until {
            if entry.created_at.as_str() >= until.as_str() {
                return false;
            }
        }
        true
    }

    fn page<'a>(&self, entries: impl Iterator<Item = &'a LogEntry>) -> ListResponse {
        let matching: Vec<&LogEntry> = entries.filter(|e| self.matches(e)).collect();
        let log_entries: Vec<LogEntry> = matching
            .iter()
            .skip(self.offset)
            .take(self.limit)
            .map(|e| (*e).clone())
            .collect();
        ListResponse {
            offset: self.offset,
            limit: self.limit,
            more: self.offset + log_entries.len() < matching.len(),
            total: self.total.then_some(matching.len()),
            log_entries,
        }
    }
}

pub fn app() -> Router {
    app_with(fixtures())
}

pub fn app_with(entries: Vec<LogEntry>) -> Router {
    let db: Db = Arc::new(RwLock::new(entries));
    Router::new()
        .route("/log_entries", get(list_log_entries))
        .route("/log_entries/{id}", get(get_log_entry))
        .route("/incidents/{id}/log_entries", get(list_incident_log_entries))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_log_entries(
    State(db): State<Db>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, StatusCode> {
    let query = ListQuery::from_pairs(&pairs)?;
    debug!(?query, "list log entries");
    let entries = db.read().await;
    Ok(Json(query.page(entries.iter())))
}

async fn list_incident_log_entries(
    State(db): State<Db>,
    Path(incident_id): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, StatusCode> {
    let query = ListQuery::from_pairs(&pairs)?;
    debug!(%incident_id, ?query, "list incident log entries");
    let entries = db.read().await;
    Ok(Json(query.page(entries.iter().filter(|e| e.incident.id == incident_id))))
}

async fn get_log_entry(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Envelope>, StatusCode> {
    let entries = db.read().await;
    entries
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .map(|log_entry| Json(Envelope { log_entry }))
        .ok_or(StatusCode::NOT_FOUND)
}

fn entry(
    id: &str,
    kind: &str,
    summary: &str,
    created_at: &str,
    agent: &Reference,
    channel: Value,
    incident: &Reference,
) -> LogEntry {
    LogEntry {
        id: id.to_string(),
        kind: kind.to_string(),
        summary: summary.to_string(),
        created_at: created_at.to_string(),
        agent: agent.clone(),
        channel,
        incident: incident.clone(),
        teams: vec![reference("PQ9K7I8", "team_reference", "Operations")],
        contexts: Vec::new(),
        acknowledgement_timeout: None,
        event_details: Map::new(),
    }
}

fn reference(id: &str, kind: &str, summary: &str) -> Reference {
    Reference {
        id: id.to_string(),
        kind: kind.to_string(),
        summary: summary.to_string(),
    }
}

/// Five entries across two incidents, newest first.
pub fn fixtures() -> Vec<LogEntry> {
    let fire = reference("PT4KHLK", "incident_reference", "[#1234] The server is on fire.");
    let disk = reference("PQ7VZ2B", "incident_reference", "[#1235] Disk almost full");
    let earline = reference("PXPGF42", "user_reference", "Earline Greenholt");
    let monitoring = reference("PIJ90N7", "service_reference", "Monitoring");

    let mut resolve = entry(
        "R5CZ1D2QH4N5AX",
        "resolve_log_entry",
        "Resolved by Earline Greenholt",
        "2024-03-01T11:00:00Z",
        &earline,
        json!({"type": "website", "summary": "Resolved from the website"}),
        &fire,
    );
    resolve.contexts = vec![json!({
        "type": "link",
        "href": "https://status.example.com",
        "text": "Status page"
    })];

    let mut acknowledge = entry(
        "Q02JTSNZWHSEKV",
        "acknowledge_log_entry",
        "Acknowledged by Earline Greenholt",
        "2024-03-01T10:05:00Z",
        &earline,
        json!({"type": "mobile", "summary": "Acknowledged from the app"}),
        &fire,
    );
    acknowledge.acknowledgement_timeout = Some(1800);

    let notify = entry(
        "N1K3DMW8QZ0VJA",
        "notify_log_entry",
        "Notified Earline Greenholt by SMS",
        "2024-03-01T10:01:00Z",
        &monitoring,
        json!({"type": "auto"}),
        &fire,
    );

    let mut trigger = entry(
        "T8S1VUJ4E5GHLZ",
        "trigger_log_entry",
        "Triggered through the API",
        "2024-03-01T10:00:00Z",
        &monitoring,
        json!({
            "type": "api",
            "service_key": "d9b4c5e2a1f3",
            "description": "The server is on fire.",
            "incident_key": "srv01/fire",
            "details": {"temperature": "451F"}
        }),
        &fire,
    );
    trigger
        .event_details
        .insert("description".to_string(), json!("The server is on fire."));

    let manual = entry(
        "M4B7WQ2XK9C3RE",
        "trigger_log_entry",
        "Triggered by Earline Greenholt",
        "2024-02-28T08:30:00Z",
        &earline,
        json!({"type": "web_trigger", "summary": "Disk almost full", "subject": "Disk almost full"}),
        &disk,
    );

    vec![resolve, acknowledge, notify, trigger, manual]
}
