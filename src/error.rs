//! Unified SDK error types.
//!
//! Every failure that crosses the HTTP boundary is normalized into one
//! [`ApiError`] carrying a closed [`ErrorKind`]. Domain sub-clients wrap it in
//! [`SdkError`] together with client-side validation and configuration errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug, Clone)]
pub enum SdkError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SdkError {
    /// The error kind, if this error came from the API boundary.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Api(e) => Some(e.kind),
            _ => None,
        }
    }
}

// ─── ErrorKind ───────────────────────────────────────────────────────────────

/// Closed set of failure categories surfaced by the API client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    RateLimited,
    Timeout,
    ServerError,
    NetworkError,
    Unknown,
}

impl ErrorKind {
    /// Map an HTTP status code to its error kind. Status `0` stands for a
    /// transport failure with no response.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            422 => Self::Validation,
            429 => Self::RateLimited,
            408 => Self::Timeout,
            0 => Self::NetworkError,
            s if s >= 500 => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Validation => "VALIDATION",
            Self::RateLimited => "RATE_LIMITED",
            Self::Timeout => "TIMEOUT",
            Self::ServerError => "SERVER_ERROR",
            Self::NetworkError => "NETWORK_ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Human-readable default message for a status code.
pub fn default_message(status: u16) -> &'static str {
    match status {
        401 => "You must be logged in to perform this action",
        403 => "You do not have permission to perform this action",
        404 => "The requested resource was not found",
        422 => "The provided data is invalid",
        429 => "Too many requests. Please try again later",
        408 => "Request timeout. Please try again",
        0 => "Network error. Please check your connection",
        s if s >= 500 => "Server error. Please try again later",
        _ => "An unexpected error occurred",
    }
}

// ─── ApiError ────────────────────────────────────────────────────────────────

/// A normalized failure from the API client.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} ({status}): {message}")]
pub struct ApiError {
    /// HTTP status, `408` for client-side timeouts, `0` for transport failures.
    pub status: u16,
    pub kind: ErrorKind,
    pub message: String,
    /// Machine-readable code from the server body, if it sent one.
    pub code: Option<String>,
    pub details: Option<serde_json::Value>,
}

/// Error body shape: either flat or nested under `error`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    details: Option<serde_json::Value>,
    error: Option<Box<ErrorBody>>,
}

impl ApiError {
    /// Build an error for `status` with the default message.
    pub fn from_status(status: u16) -> Self {
        Self {
            status,
            kind: ErrorKind::from_status(status),
            message: default_message(status).to_string(),
            code: None,
            details: None,
        }
    }

    /// Build an error from a non-2xx response. A JSON body may override the
    /// message and supply a code and details; anything else falls back to the
    /// status default.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed: ErrorBody = serde_json::from_slice(body).unwrap_or_default();
        let parsed = match parsed {
            ErrorBody {
                message: None,
                error: Some(inner),
                ..
            } => *inner,
            other => other,
        };

        let message = parsed
            .message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| default_message(status).to_string());

        Self {
            status,
            kind: ErrorKind::from_status(status),
            message,
            code: parsed.code,
            details: parsed.details.filter(|d| !d.is_null()),
        }
    }

    pub fn timeout() -> Self {
        Self::from_status(408)
    }

    pub fn network(cause: impl std::fmt::Display) -> Self {
        Self {
            details: Some(serde_json::json!({ "cause": cause.to_string() })),
            ..Self::from_status(0)
        }
    }

    /// The refresh flow failed and the session is gone.
    pub fn session_expired() -> Self {
        Self {
            message: "Session expired. Please log in again.".to_string(),
            ..Self::from_status(401)
        }
    }

    /// The request body could not be serialized; nothing was sent.
    pub fn encode(cause: impl std::fmt::Display) -> Self {
        Self {
            status: 0,
            kind: ErrorKind::Unknown,
            message: format!("Failed to encode request body: {}", cause),
            code: None,
            details: None,
        }
    }

    /// A success response whose body did not match the expected shape.
    pub fn decode(status: u16, cause: impl std::fmt::Display) -> Self {
        Self {
            status,
            kind: ErrorKind::Unknown,
            message: format!("Failed to decode response: {}", cause),
            code: None,
            details: None,
        }
    }
}

/// Message suitable for showing to an end user.
pub fn user_friendly_message(error: &SdkError) -> String {
    match error {
        SdkError::Api(e) => e.message.clone(),
        SdkError::Validation(msg) => msg.clone(),
        SdkError::Config(_) => "An unexpected error occurred".to_string(),
    }
}
