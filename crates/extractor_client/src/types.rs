use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type RequestId = u64;

/// JSON body of `POST /api/scrape`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeRequest {
    pub formula: String,
    pub spreadsheet_url: String,
}

/// JSON body of a 2xx answer. Missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ScrapeResponse {
    pub success: bool,
    pub count: u64,
    pub data: Vec<Value>,
    pub message: Option<String>,
}

/// Error body the API sends with non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ErrorBody {
    pub detail: Option<Value>,
}

impl ErrorBody {
    /// Only string details are shown to the user.
    pub(crate) fn into_detail(self) -> Option<String> {
        match self.detail {
            Some(Value::String(detail)) => Some(detail),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Settled {
        request_id: RequestId,
        result: Result<ScrapeResponse, ScrapeError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ScrapeError {
    pub kind: FailureKind,
    /// `detail` from the server's error body.
    pub detail: Option<String>,
    pub message: String,
}

impl ScrapeError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            detail: None,
            message: message.into(),
        }
    }

    pub(crate) fn with_detail(mut self, detail: Option<String>) -> Self {
        self.detail = detail;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    Encode,
    HttpStatus(u16),
    Timeout,
    Network,
    /// The worker runtime went away before the call settled.
    Unavailable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::Encode => write!(f, "request encoding failed"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Unavailable => write!(f, "client unavailable"),
        }
    }
}
