//! Transport abstraction: the only network boundary of the crate

use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use serde_json::Value;

use crate::error::TransportError;

/// Response returned by a [`Transport`] that did not fail
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase or transport-provided status text
    pub status_text: String,
    /// Decoded payload; `None` when the response carried none
    pub data: Option<Value>,
}

impl TransportResponse {
    /// A `200 OK` response with the given payload
    pub fn ok(data: Value) -> Self {
        Self {
            status: 200,
            status_text: "OK".to_string(),
            data: Some(data),
        }
    }

    /// A response without payload
    pub fn empty(status: u16, status_text: impl Into<String>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            data: None,
        }
    }
}

/// Injected client capable of dispatching a method, path and body
///
/// Implementations own authentication, headers, serialization and timeouts.
/// The body is passed through opaquely.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch one request
    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError> {
        (**self).dispatch(method, path, body).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn dispatch(
        &self,
        method: &Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse, TransportError> {
        (**self).dispatch(method, path, body).await
    }
}
