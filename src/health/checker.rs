// src/health/checker.rs
use super::error::ProbeError;
use super::status::{HealthBody, HealthReport};
use crate::config::ProbeConfig;
use reqwest::Client;
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Queries a service's health endpoint once per [`HealthProbe::check`] call.
pub struct HealthProbe {
    config: ProbeConfig,
    target: Url,
    client: Client,
}

impl HealthProbe {
    pub fn new(config: ProbeConfig) -> Result<Self, ProbeError> {
        let target = config.target().map_err(|e| ProbeError::InvalidTarget {
            url: format!("{}{}", config.base_url, config.health_path),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.timeout())
            .build()
            .map_err(ProbeError::Client)?;

        Ok(Self {
            config,
            target,
            client,
        })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    pub fn target(&self) -> &Url {
        &self.target
    }

    /// Send one GET to the health endpoint and validate status code, body
    /// shape and the reported `status` value, in that order.
    pub async fn check(&self) -> Result<HealthReport, ProbeError> {
        let url = self.target.as_str();
        let start = Instant::now();

        debug!(%url, "Probing health endpoint");

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(%url, error = %e, "Health request failed");
            self.transport_error(e)
        })?;

        let status_code = response.status().as_u16();
        if status_code != self.config.expected_status_code {
            warn!(%url, status_code, "Unexpected health status code");
            return Err(ProbeError::UnexpectedStatusCode {
                url: url.to_string(),
                expected: self.config.expected_status_code,
                actual: status_code,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;
        let response_time_ms = start.elapsed().as_millis() as u64;

        let body = HealthBody::parse(&bytes)?;
        if self.config.strict_body {
            body.ensure_exact()?;
        }

        if !self.config.is_accepted(&body.status) {
            warn!(
                %url,
                status = %body.status,
                accepted = ?self.config.accepted_statuses,
                "Service reported an unaccepted health status"
            );
            return Err(ProbeError::UnexpectedHealthValue {
                actual: body.status,
                accepted: self.config.accepted_statuses.clone(),
            });
        }

        info!(%url, status = %body.status, response_time_ms, "Service is healthy");

        Ok(HealthReport {
            url: url.to_string(),
            status_code,
            status: body.status,
            response_time_ms,
            checked_at: chrono::Utc::now(),
        })
    }

    fn transport_error(&self, error: reqwest::Error) -> ProbeError {
        if error.is_timeout() {
            ProbeError::Timeout {
                url: self.target.to_string(),
                timeout_secs: self.config.timeout_secs,
            }
        } else {
            ProbeError::Connection {
                url: self.target.to_string(),
                source: error,
            }
        }
    }
}

/// Probe `<base_url>/health` with the default settings.
pub async fn check_health(base_url: &str) -> Result<HealthReport, ProbeError> {
    let config = ProbeConfig::default()
        .with_base_url(base_url)
        .map_err(|e| ProbeError::InvalidTarget {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

    HealthProbe::new(config)?.check().await
}
