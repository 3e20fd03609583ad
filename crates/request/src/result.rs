//! The normalized outcome of a single request.

use serde_json::Value;

use crate::error::RequestError;

/// Outcome of [`RequestService::send`](crate::RequestService::send).
///
/// A completed call populates exactly one of `data` or `error`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestResult {
    /// Response payload on success
    pub data: Option<Value>,
    /// Normalized failure
    pub error: Option<RequestError>,
}

impl RequestResult {
    /// Successful outcome
    pub fn ok(data: Value) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    /// Failed outcome
    pub fn err(error: impl Into<RequestError>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }

    /// Whether the call succeeded
    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.data.is_some()
    }

    /// Convert into a standard `Result`
    pub fn into_result(self) -> Result<Value, RequestError> {
        match (self.data, self.error) {
            (_, Some(error)) => Err(error),
            (Some(data), None) => Ok(data),
            (None, None) => Ok(Value::Null),
        }
    }
}

impl From<Result<Value, RequestError>> for RequestResult {
    fn from(result: Result<Value, RequestError>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::err(error),
        }
    }
}
