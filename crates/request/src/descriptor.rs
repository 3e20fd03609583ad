//! Request descriptors: the identity and payload of a single call.

use http::Method;
use serde_json::Value;

/// Describes one request against a transport.
///
/// Descriptors are cheap to clone and are cloned for every send, so a
/// send in flight never observes later edits made by its poller.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    /// Request path, resolved by the transport (e.g. against a base URL).
    pub path: String,
    /// HTTP method.
    pub method: Method,
    /// Optional request body, passed to the transport untouched.
    pub body: Option<Value>,
    /// Caller-defined analytics label. Recorded on the request span only.
    pub action_type: Option<String>,
}

impl RequestDescriptor {
    /// Create a descriptor without a body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            body: None,
            action_type: None,
        }
    }

    /// Shorthand for a `GET` descriptor.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` descriptor.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Attach a body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach an analytics label.
    #[must_use]
    pub fn with_action_type(mut self, action_type: impl Into<String>) -> Self {
        self.action_type = Some(action_type.into());
        self
    }

    /// Whether `other` targets the same endpoint.
    ///
    /// Only `(path, method)` identify a target; body and labels do not.
    pub fn same_target(&self, other: &Self) -> bool {
        self.path == other.path && self.method == other.method
    }
}
