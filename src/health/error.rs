// src/health/error.rs
use std::fmt;

/// Coarse failure category reported by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ConnectionError,
    UnexpectedStatusCode,
    MalformedResponseBody,
    UnexpectedHealthValue,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::ConnectionError => "ConnectionError",
            ErrorKind::UnexpectedStatusCode => "UnexpectedStatusCode",
            ErrorKind::MalformedResponseBody => "MalformedResponseBody",
            ErrorKind::UnexpectedHealthValue => "UnexpectedHealthValue",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Invalid probe target '{url}': {reason}")]
    InvalidTarget { url: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    #[error("Unexpected status code from {url}: expected {expected}, got {actual}")]
    UnexpectedStatusCode {
        url: String,
        expected: u16,
        actual: u16,
    },

    #[error("Malformed health response body: {reason}")]
    MalformedResponseBody { reason: String },

    #[error("Unexpected health status '{actual}', accepted: {accepted:?}")]
    UnexpectedHealthValue {
        actual: String,
        accepted: Vec<String>,
    },
}

impl ProbeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProbeError::InvalidTarget { .. }
            | ProbeError::Client(_)
            | ProbeError::Connection { .. }
            | ProbeError::Timeout { .. } => ErrorKind::ConnectionError,
            ProbeError::UnexpectedStatusCode { .. } => ErrorKind::UnexpectedStatusCode,
            ProbeError::MalformedResponseBody { .. } => ErrorKind::MalformedResponseBody,
            ProbeError::UnexpectedHealthValue { .. } => ErrorKind::UnexpectedHealthValue,
        }
    }
}
