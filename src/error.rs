//! Error handling for the student records client

use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Error body returned by the records API
///
/// Every field is optional; the server uses `message` for most failures,
/// `error` for auth failures and `errors` for per-field validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    /// Numeric status echoed by the server
    #[serde(default)]
    pub status: Option<u16>,

    /// Short error name, e.g. `Unauthorized`
    #[serde(default)]
    pub error: Option<String>,

    /// Human readable message
    #[serde(default)]
    pub message: Option<String>,

    /// Validation errors keyed by field name
    #[serde(default)]
    pub errors: Option<BTreeMap<String, String>>,
}

impl ApiErrorBody {
    /// Parse a response body, keeping non-JSON text as the message
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(text) {
            Ok(body) => body,
            Err(_) => {
                let trimmed = text.trim();
                Self {
                    message: (!trimmed.is_empty()).then(|| trimmed.to_string()),
                    ..Default::default()
                }
            }
        }
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(error) = &self.error {
            parts.push(error.clone());
        }
        if let Some(message) = &self.message {
            parts.push(message.clone());
        }
        if let Some(errors) = &self.errors {
            for (field, message) in errors {
                parts.push(format!("{}: {}", field, message));
            }
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Unified error type for the student records client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with a non-success status
    #[error("API error ({status}): {body}")]
    Api {
        status: StatusCode,
        body: ApiErrorBody,
    },

    /// Client storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// General errors
    #[error("{0}")]
    General(String),
}

/// Classification of a failed request, as seen by a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// 401: the session is missing or expired
    Unauthorized,
    /// 400 carrying a field error map
    Validation(BTreeMap<String, String>),
    /// 404
    NotFound,
    /// Any other status, transport or decoding failure
    Other,
}

impl Error {
    /// Create a new storage error
    pub fn storage<T: fmt::Display>(msg: T) -> Self {
        Error::Storage(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Field errors of a 400 validation failure
    pub fn field_errors(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Error::Api { status, body } if *status == StatusCode::BAD_REQUEST => {
                body.errors.as_ref().filter(|errors| !errors.is_empty())
            }
            _ => None,
        }
    }

    /// The server-provided message, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api { body, .. } => body.message.as_deref().filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }

    /// Classify the error by status code
    pub fn kind(&self) -> ErrorKind {
        if let Some(errors) = self.field_errors() {
            return ErrorKind::Validation(errors.clone());
        }
        match self.status() {
            Some(StatusCode::UNAUTHORIZED) => ErrorKind::Unauthorized,
            Some(StatusCode::NOT_FOUND) => ErrorKind::NotFound,
            _ => ErrorKind::Other,
        }
    }
}
