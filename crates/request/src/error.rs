//! Error types for request normalization and transport setup
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Structured response attached to a failed transport call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase or transport-provided status text
    #[serde(default)]
    pub status_text: String,
    /// Decoded response body, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl ErrorResponse {
    /// Create a response carrying only a status code
    pub fn new(status: u16) -> Self {
        Self {
            status,
            status_text: String::new(),
            body: None,
        }
    }

    /// Set the status text
    #[must_use]
    pub fn with_status_text(mut self, status_text: impl Into<String>) -> Self {
        self.status_text = status_text.into();
        self
    }

    /// Set the response body
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Failure raised by a [`Transport`](crate::Transport)
///
/// A transport fails either before any response exists (connection refused,
/// timeout) or after receiving a response it considers an error. Only the
/// latter carries `response`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct TransportError {
    /// Human-readable failure description
    pub message: String,
    /// Response received before the failure, if any
    pub response: Option<ErrorResponse>,
}

impl TransportError {
    /// Failure without a response
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: None,
        }
    }

    /// Failure carrying the response that caused it
    pub fn with_response(message: impl Into<String>, response: ErrorResponse) -> Self {
        Self {
            message: message.into(),
            response: Some(response),
        }
    }
}

/// Normalized request failure, as surfaced in a [`RequestResult`](crate::RequestResult)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    /// The transport failed with a structured response; the response itself is the error
    #[error("request failed with status {}", .0.status)]
    Response(ErrorResponse),

    /// The transport failed without a response
    #[error(transparent)]
    Transport(TransportError),

    /// The transport succeeded but returned no payload
    #[error("{status_text}")]
    MissingPayload {
        /// Status text of the payload-less response
        status_text: String,
    },
}

impl RequestError {
    /// The structured response behind this error, if any
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Response(response) => Some(response),
            Self::Transport(_) | Self::MissingPayload { .. } => None,
        }
    }

    /// HTTP status behind this error, if any
    pub fn status(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }
}

impl From<TransportError> for RequestError {
    fn from(err: TransportError) -> Self {
        match err.response {
            Some(response) => Self::Response(response),
            None => Self::Transport(err),
        }
    }
}

/// Errors raised while building a transport
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The base URL could not be parsed
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// A default header name or value is not valid HTTP
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader {
        /// The header name as configured
        name: String,
        /// Validation message
        reason: String,
    },

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {message}")]
    ClientBuild {
        /// The error message
        message: String,
        /// The underlying error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type for transport setup
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
