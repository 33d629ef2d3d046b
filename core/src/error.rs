//! Error types for the warehouse API client.
//!
//! # Design
//! Every failed dispatch is a `RequestError`. HTTP failures carry one
//! `ErrorDetail` (status code, status text, body) and are split by status class
//! so callers can log or react differently; transport failures get their own
//! variants. `Display` always renders the status code and status text for HTTP
//! failures, which is what the end user sees.

use thiserror::Error;

use crate::http::HttpResponse;

/// Status metadata of a failed HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl ErrorDetail {
    /// Capture the detail of `response`, filling in the canonical reason phrase
    /// when the transport did not supply one.
    pub fn from_response(response: &HttpResponse) -> Self {
        let status_text = if response.status_text.trim().is_empty() {
            canonical_reason(response.status).to_string()
        } else {
            response.status_text.clone()
        };
        Self {
            status: response.status,
            status_text,
            body: response.body.clone(),
        }
    }
}

fn canonical_reason(status: u16) -> &'static str {
    ::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown Status")
}

/// Errors produced by a dispatch, a view reload, or a `parse_*` call.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never produced a response (connection refused, DNS, reset).
    #[error("Error: network failure: {0}")]
    Network(String),

    /// The transport gave up waiting for a response.
    #[error("Error: request timed out")]
    Timeout,

    /// The server answered with a 4xx status.
    #[error("Error: {} {}", .0.status, .0.status_text)]
    Client(ErrorDetail),

    /// The server answered with a 5xx status.
    #[error("Error: {} {}", .0.status, .0.status_text)]
    Server(ErrorDetail),

    /// The server answered with a non-2xx status outside 4xx/5xx.
    #[error("Error: {} {}", .0.status, .0.status_text)]
    UnexpectedStatus(ErrorDetail),

    /// A view body could not be deserialized into the expected type.
    #[error("Error: deserialization failed: {0}")]
    Deserialization(String),

    /// A request payload could not be serialized to JSON.
    #[error("Error: serialization failed: {0}")]
    Serialization(String),
}

impl RequestError {
    /// Classify a non-2xx response by status class.
    pub fn from_status(response: &HttpResponse) -> Self {
        let detail = ErrorDetail::from_response(response);
        match detail.status {
            400..=499 => RequestError::Client(detail),
            500..=599 => RequestError::Server(detail),
            _ => RequestError::UnexpectedStatus(detail),
        }
    }

    /// The HTTP detail, if the failure came from a response.
    pub fn detail(&self) -> Option<&ErrorDetail> {
        match self {
            RequestError::Client(detail)
            | RequestError::Server(detail)
            | RequestError::UnexpectedStatus(detail) => Some(detail),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.detail().map(|detail| detail.status)
    }
}
