//! Request options and their query-string encoding.
//!
//! Options are plain values that get encoded once per request. Empty optional
//! fields are left out of the query entirely. Relation expansions use the
//! bracketed form, one `include[]` pair per member.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Related resources the API can inline in a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEntryInclude {
    Incidents,
    Services,
    Channels,
    Teams,
}

impl LogEntryInclude {
    pub fn as_str(self) -> &'static str {
        match self {
            LogEntryInclude::Incidents => "incidents",
            LogEntryInclude::Services => "services",
            LogEntryInclude::Channels => "channels",
            LogEntryInclude::Teams => "teams",
        }
    }
}

/// Options for listing log entries, account-wide or for one incident.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListLogEntriesOptions {
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    /// Ask the API to fill in `total` on the response.
    pub total: bool,
    pub time_zone: String,
    pub since: Option<String>,
    pub until: Option<String>,
    pub is_overview: bool,
    pub includes: BTreeSet<LogEntryInclude>,
}

/// Options for fetching a single log entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GetLogEntryOptions {
    pub time_zone: String,
    pub includes: BTreeSet<LogEntryInclude>,
}

/// Conversion of an options value into ordered query pairs.
pub trait QueryParams {
    fn query_pairs(&self) -> Vec<(&'static str, String)>;

    /// The form-urlencoded query string, without a leading `?`.
    fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.extend_pairs(self.query_pairs());
        serializer.finish()
    }
}

impl QueryParams for ListLogEntriesOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if self.total {
            pairs.push(("total", "true".to_string()));
        }
        push_non_empty(&mut pairs, "time_zone", Some(self.time_zone.as_str()));
        push_non_empty(&mut pairs, "since", self.since.as_deref());
        push_non_empty(&mut pairs, "until", self.until.as_deref());
        if self.is_overview {
            pairs.push(("is_overview", "true".to_string()));
        }
        push_includes(&mut pairs, &self.includes);
        pairs
    }
}

impl QueryParams for GetLogEntryOptions {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "timezone", Some(self.time_zone.as_str()));
        push_includes(&mut pairs, &self.includes);
        pairs
    }
}

fn push_non_empty(
    pairs: &mut Vec<(&'static str, String)>,
    name: &'static str,
    value: Option<&str>,
) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((name, value.to_string()));
    }
}

fn push_includes(pairs: &mut Vec<(&'static str, String)>, includes: &BTreeSet<LogEntryInclude>) {
    pairs.extend(includes.iter().map(|include| ("include[]", include.as_str().to_string())));
}
