// src/config/models.rs
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_HEALTH_PATH: &str = "/health";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_EXPECTED_STATUS_CODE: u16 = 200;

/// Status values that count as healthy unless overridden.
pub const DEFAULT_ACCEPTED_STATUSES: [&str; 2] = ["healthy", "ok"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProbeConfig {
    /// Origin of the probed service.
    pub base_url: Url,
    pub health_path: String,
    /// Values of the body's `status` field that count as healthy. Also
    /// accepts a single comma-separated string, as env overrides provide.
    #[serde(deserialize_with = "string_or_list")]
    pub accepted_statuses: Vec<String>,
    pub expected_status_code: u16,
    pub timeout_secs: u64,
    /// Reject bodies carrying any key besides `status`.
    pub strict_body: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    List(Vec<String>),
    One(String),
}

fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match StringOrList::deserialize(deserializer)? {
        StringOrList::List(list) => list,
        StringOrList::One(joined) => joined.split(',').map(|s| s.trim().to_string()).collect(),
    })
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            health_path: DEFAULT_HEALTH_PATH.to_string(),
            accepted_statuses: DEFAULT_ACCEPTED_STATUSES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            expected_status_code: DEFAULT_EXPECTED_STATUS_CODE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            strict_body: false,
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Replace the base URL, parsing it from a string.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, url::ParseError> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }

    pub fn with_accepted_statuses<I, S>(mut self, statuses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_statuses = statuses.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_accepted(&self, status: &str) -> bool {
        self.accepted_statuses.iter().any(|s| s == status)
    }

    /// Full request target: `health_path` appended to the base URL's path,
    /// so `http://host:8000/api` probes `http://host:8000/api/health`.
    pub fn target(&self) -> Result<Url, url::ParseError> {
        if self.base_url.cannot_be_a_base() {
            return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
        }

        let mut target = self.base_url.clone();
        let path = format!(
            "{}{}",
            self.base_url.path().trim_end_matches('/'),
            self.health_path
        );
        target.set_path(&path);
        target.set_query(None);
        target.set_fragment(None);
        Ok(target)
    }

    pub fn validate(&self) -> Result<()> {
        match self.base_url.scheme() {
            "http" | "https" => {}
            other => bail!("Unsupported base_url scheme '{}': expected http or https", other),
        }

        if self.base_url.host_str().map_or(true, str::is_empty) {
            bail!("base_url '{}' has no host", self.base_url);
        }

        if !self.health_path.starts_with('/') {
            bail!("health_path '{}' must start with '/'", self.health_path);
        }

        if self.accepted_statuses.is_empty() {
            bail!("accepted_statuses must contain at least one value");
        }

        if let Some(blank) = self.accepted_statuses.iter().find(|s| s.trim().is_empty()) {
            bail!("accepted_statuses contains a blank entry: {:?}", blank);
        }

        if self.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }

        if !(100..=599).contains(&self.expected_status_code) {
            bail!(
                "expected_status_code {} is not a valid HTTP status",
                self.expected_status_code
            );
        }

        self.target()
            .with_context(|| format!("Cannot build probe target from '{}'", self.health_path))?;

        Ok(())
    }
}
