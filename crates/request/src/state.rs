//! Observable poller state

use std::time::Duration;

use serde_json::Value;

use crate::config::{PollingConfig, normalize_interval};
use crate::error::RequestError;

/// Snapshot of a [`Poller`](crate::Poller)'s state
///
/// `data` and `error` are never cleared when a new send starts; consumers
/// decide whether to show the previous values, `initial_data` or a loading
/// indicator while `loading` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct PollingState {
    /// A send is in flight
    pub loading: bool,
    /// Error of the last committed completion
    pub error: Option<RequestError>,
    /// Data of the last committed completion, or `initial_data` before one
    pub data: Option<Value>,
    /// Data supplied at attachment
    pub initial_data: Option<Value>,
    /// Active polling period
    pub current_interval: Option<Duration>,
    /// No completion has been committed since attachment
    pub is_initial_request: bool,
}

impl PollingState {
    pub(crate) fn initial(config: &PollingConfig) -> Self {
        Self {
            loading: true,
            error: None,
            data: config.initial_data.clone(),
            initial_data: config.initial_data.clone(),
            current_interval: normalize_interval(config.interval),
            is_initial_request: true,
        }
    }

    /// Whether polling is configured
    pub fn is_polling(&self) -> bool {
        self.current_interval.is_some()
    }
}
