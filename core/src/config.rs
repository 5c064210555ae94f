//! Client configuration read from the environment.

use std::time::Duration;

use tracing::warn;

pub const DEFAULT_BASE_URL: &str = "https://api.pagerduty.com";

/// Where to send requests and how long a transport may wait for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Reads `PAGERDUTY_API_URL` and `PAGERDUTY_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("PAGERDUTY_API_URL")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout = lookup("PAGERDUTY_TIMEOUT_SECS").and_then(|raw| match raw.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(e) => {
                warn!(value = %raw, error = %e, "ignoring invalid PAGERDUTY_TIMEOUT_SECS");
                None
            }
        });

        Self { base_url, timeout }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(ClientConfig::from_lookup(lookup(&[])), ClientConfig::default());
    }

    #[test]
    fn reads_url_and_timeout() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("PAGERDUTY_API_URL", "http://127.0.0.1:3000"),
            ("PAGERDUTY_TIMEOUT_SECS", "15"),
        ]));
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn invalid_timeout_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[("PAGERDUTY_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.timeout, None);
    }
}
