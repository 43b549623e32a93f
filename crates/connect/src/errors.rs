//! Error types for backend API calls.
//!
//! Four things can go wrong on the wire: the server never answers
//! ([`ApiError::Network`]), it answers with a non-2xx status
//! ([`ApiError::Http`]), it answers 2xx with a body we cannot decode
//! ([`ApiError::Decode`]), or every candidate route for an operation
//! turns out to be dead ([`ApiError::AllCandidatesExhausted`]).

use serde_json::Value;
use thiserror::Error;

/// Type alias for Result using our ApiError type.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors produced by the HTTP client adapter and the fallback resolver.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response was received at all (DNS, refused connection, timeout).
    #[error("Unable to reach the server: {0}")]
    Network(#[from] reqwest::Error),

    /// The server responded with a non-2xx status. Carries whatever
    /// structured detail the backend put in the body.
    #[error("{}", .0.message())]
    Http(HttpFailure),

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// A terminal failure from the fallback resolver, unchanged except
    /// for the list of candidate paths tried before it occurred.
    #[error("{} (attempted paths: {})", .source, .attempted.join(", "))]
    Attempted {
        attempted: Vec<String>,
        #[source]
        source: Box<ApiError>,
    },

    /// Every candidate path for the operation returned 404.
    #[error("No candidate endpoint responded (attempted paths: {})", .attempted.join(", "))]
    AllCandidatesExhausted {
        attempted: Vec<String>,
        #[source]
        source: Box<ApiError>,
    },

    /// Invariant breaches: malformed header values, empty candidate lists.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    /// True when the error is an HTTP 404, which the fallback resolver
    /// treats as "try the next candidate".
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Http(failure) if failure.status == 404)
    }

    /// Candidate paths recorded by the fallback resolver, if any.
    pub fn attempted_paths(&self) -> Option<&[String]> {
        match self {
            ApiError::Attempted { attempted, .. }
            | ApiError::AllCandidatesExhausted { attempted, .. } => Some(attempted),
            _ => None,
        }
    }
}

/// A non-2xx response: status plus the best human-readable message that
/// could be extracted from the body.
#[derive(Debug)]
pub struct HttpFailure {
    pub status: u16,
    pub detail: Option<String>,
    pub body: String,
}

impl HttpFailure {
    /// Builds a failure from a response body, probing it for DRF-style
    /// structured detail.
    pub fn from_body(status: u16, body: String) -> Self {
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|value| extract_detail(&value));
        Self {
            status,
            detail,
            body,
        }
    }

    /// The user-facing message: backend detail when present, else the
    /// bare status.
    pub fn message(&self) -> String {
        self.detail
            .clone()
            .unwrap_or_else(|| format!("HTTP {}", self.status))
    }
}

/// Pulls the most specific message out of a DRF-style error body, in
/// preference order: `detail`, `error`, `message`, `non_field_errors`,
/// then joined field-specific errors.
fn extract_detail(value: &Value) -> Option<String> {
    if let Some(text) = value.as_str() {
        return Some(text.to_string());
    }
    let object = value.as_object()?;
    for key in ["detail", "error", "message"] {
        if let Some(text) = object.get(key).and_then(Value::as_str) {
            return Some(text.to_string());
        }
    }
    if let Some(joined) = object.get("non_field_errors").and_then(join_messages) {
        return Some(joined);
    }
    let field_errors: Vec<String> = object
        .iter()
        .filter_map(|(key, messages)| {
            join_messages(messages).map(|joined| format!("{}: {}", key, joined))
        })
        .collect();
    if field_errors.is_empty() {
        None
    } else {
        Some(field_errors.join(" | "))
    }
}

fn join_messages(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        _ => None,
    }
}
