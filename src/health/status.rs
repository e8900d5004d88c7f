// src/health/status.rs
use super::error::ProbeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parsed body of a health endpoint response: `{"status": "<string>"}`.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthBody {
    pub status: String,
    /// Keys other than `status`.
    pub extra: Map<String, Value>,
}

impl HealthBody {
    pub fn parse(bytes: &[u8]) -> Result<Self, ProbeError> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| {
            ProbeError::MalformedResponseBody {
                reason: format!("body is not valid JSON ({}): {}", e, preview(bytes)),
            }
        })?;

        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(ProbeError::MalformedResponseBody {
                    reason: format!("expected a JSON object, got {}", json_type(&other)),
                })
            }
        };

        let status = match fields.remove("status") {
            Some(Value::String(status)) => status,
            Some(other) => {
                return Err(ProbeError::MalformedResponseBody {
                    reason: format!("'status' must be a string, got {}", json_type(&other)),
                })
            }
            None => {
                return Err(ProbeError::MalformedResponseBody {
                    reason: "missing 'status' field".to_string(),
                })
            }
        };

        Ok(Self {
            status,
            extra: fields,
        })
    }

    /// Fail if the body carries anything besides `status`.
    pub fn ensure_exact(&self) -> Result<(), ProbeError> {
        if self.extra.is_empty() {
            return Ok(());
        }

        let keys: Vec<&str> = self.extra.keys().map(String::as_str).collect();
        Err(ProbeError::MalformedResponseBody {
            reason: format!("unexpected keys alongside 'status': {}", keys.join(", ")),
        })
    }
}

/// Outcome of a passing probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    pub url: String,
    pub status_code: u16,
    pub status: String,
    pub response_time_ms: u64,
    pub checked_at: DateTime<Utc>,
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// First bytes of a body, for error messages.
fn preview(bytes: &[u8]) -> String {
    const MAX: usize = 64;
    let text = String::from_utf8_lossy(&bytes[..bytes.len().min(MAX)]);
    if bytes.len() > MAX {
        format!("{:?}...", text)
    } else {
        format!("{:?}", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::ErrorKind;

    #[test]
    fn test_parse_status_object() {
        let body = HealthBody::parse(br#"{"status":"healthy"}"#).unwrap();
        assert_eq!(body.status, "healthy");
        assert!(body.extra.is_empty());
        assert!(body.ensure_exact().is_ok());
    }

    #[test]
    fn test_extra_keys_kept_but_rejected_when_exact() {
        let body = HealthBody::parse(br#"{"status":"ok","version":"1.4.2"}"#).unwrap();
        assert_eq!(body.status, "ok");
        assert_eq!(body.extra.get("version"), Some(&Value::from("1.4.2")));

        let err = body.ensure_exact().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponseBody);
        assert!(err.to_string().contains("version"));
    }

    #[test]
    fn test_malformed_bodies() {
        let bodies: [&[u8]; 5] = [
            b"OK",
            br#"["healthy"]"#,
            br#"{"state":"healthy"}"#,
            br#"{"status":true}"#,
            b"",
        ];
        for raw in bodies {
            let err = HealthBody::parse(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::MalformedResponseBody, "body {:?}", raw);
        }
    }

    #[test]
    fn test_plain_text_reason_mentions_body() {
        let err = HealthBody::parse(b"OK").unwrap_err();
        assert!(err.to_string().contains("\"OK\""));
    }
}
