//! Domain DTOs for the log entries API.
//!
//! # Design
//! These types mirror the API's JSON shapes. Every field the API may omit is
//! either an `Option` or defaults to empty, and unknown fields are ignored, so
//! additive API changes do not break decoding. Event details and channel
//! details are free-form on the wire and stay as open JSON objects here.

use std::time::Duration;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Fields shared by every object reference the API returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiObject {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

/// The actor who carried out the action: a user, service or integration.
pub type Agent = ApiObject;

/// A team the log entry's incident belongs to.
pub type Team = ApiObject;

/// Snapshot of the incident a log entry belongs to.
///
/// Only the reference fields are present unless the request asked for
/// `include[]=incidents`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    #[serde(flatten)]
    pub object: ApiObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// The means by which the logged action was carried out.
///
/// Tagged by the `type` field. A channel whose `type` is missing or not one
/// of the known kinds decodes to `Unknown` with its raw fields kept, so one
/// odd channel never fails the enclosing log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", tag = "type", rename_all = "snake_case")]
pub enum Channel {
    /// Events API or generic webhook integration.
    Api {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        service_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        incident_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<Map<String, Value>>,
    },
    Email {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subject: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        from: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<String>,
    },
    /// Incident triggered by hand from the web UI.
    WebTrigger {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        subject: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<Map<String, Value>>,
    },
    Nagios {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        service_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        incident_key: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<Map<String, Value>>,
    },
    Auto {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },
    Timeout {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },
    Website {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },
    Mobile {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },
    Note {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        summary: Option<String>,
    },
    /// Any other channel, as the raw JSON object including its `type` if any.
    #[serde(skip)]
    Unknown { fields: Map<String, Value> },
}

impl Channel {
    const KINDS: [&'static str; 9] = [
        "api",
        "email",
        "web_trigger",
        "nagios",
        "auto",
        "timeout",
        "website",
        "mobile",
        "note",
    ];

    /// The wire value of the `type` discriminant.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Channel::Api { .. } => Some("api"),
            Channel::Email { .. } => Some("email"),
            Channel::WebTrigger { .. } => Some("web_trigger"),
            Channel::Nagios { .. } => Some("nagios"),
            Channel::Auto { .. } => Some("auto"),
            Channel::Timeout { .. } => Some("timeout"),
            Channel::Website { .. } => Some("website"),
            Channel::Mobile { .. } => Some("mobile"),
            Channel::Note { .. } => Some("note"),
            Channel::Unknown { fields } => fields.get("type").and_then(Value::as_str),
        }
    }

    /// The channel's `summary` field. `Api` channels also carry a separate
    /// `description`, which is not consulted here.
    pub fn summary(&self) -> Option<&str> {
        match self {
            Channel::Api { summary, .. }
            | Channel::Email { summary, .. }
            | Channel::WebTrigger { summary, .. }
            | Channel::Nagios { summary, .. }
            | Channel::Auto { summary }
            | Channel::Timeout { summary }
            | Channel::Website { summary }
            | Channel::Mobile { summary }
            | Channel::Note { summary } => summary.as_deref(),
            Channel::Unknown { fields } => fields.get("summary").and_then(Value::as_str),
        }
    }
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Channel::Unknown { fields } => fields.serialize(serializer),
            known => Channel::serialize(known, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Channel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::deserialize(deserializer)?;
        let known = fields
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|kind| Channel::KINDS.contains(&kind));
        if !known {
            return Ok(Channel::Unknown { fields });
        }
        Channel::deserialize(Value::Object(fields)).map_err(D::Error::custom)
    }
}

/// A display annotation attached to a log entry, such as a link or image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// One event that happened to an incident.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(flatten)]
    pub object: ApiObject,
    /// Creation time as sent by the API, in the requested time zone.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub agent: Agent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident: Option<Incident>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub contexts: Vec<Context>,
    /// Seconds, present on acknowledge entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgement_timeout: Option<u64>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub event_details: Map<String, Value>,
}

impl LogEntry {
    pub fn id(&self) -> &str {
        &self.object.id
    }

    pub fn acknowledgement_timeout(&self) -> Option<Duration> {
        self.acknowledgement_timeout.map(Duration::from_secs)
    }
}

/// Response body of the list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListLogEntryResponse {
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub more: bool,
    /// Only populated when the request set `total=true`.
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub log_entries: Vec<LogEntry>,
}

/// Response body of `GET /log_entries/{id}`.
///
/// The key is optional so that a body without it is reported as
/// `ApiError::MissingField` rather than a generic decode failure. A key that
/// is present but `null` is malformed and fails to decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogEntryEnvelope {
    #[serde(default, deserialize_with = "deserialize_present")]
    log_entry: Option<LogEntry>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<LogEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    LogEntry::deserialize(deserializer).map(Some)
}

impl LogEntryEnvelope {
    pub const KEY: &'static str = "log_entry";

    pub fn log_entry(self) -> Option<LogEntry> {
        self.log_entry
    }
}
