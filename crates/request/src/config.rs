//! Poller configuration

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::descriptor::RequestDescriptor;
use crate::result::RequestResult;

/// Callback invoked with the raw result of every completed send
pub type SuccessCallback = Arc<dyn Fn(&RequestResult) + Send + Sync>;

/// Configuration for [`RequestService::use_request`](crate::RequestService::use_request)
#[derive(Clone)]
pub struct PollingConfig {
    /// Target and payload
    pub descriptor: RequestDescriptor,
    /// Polling period; `None` sends once
    pub interval: Option<Duration>,
    /// Data exposed before the first response arrives
    pub initial_data: Option<Value>,
    /// Completion notification, fired for every send including stale ones
    pub on_success: Option<SuccessCallback>,
}

impl PollingConfig {
    /// Send once, never poll
    pub fn new(descriptor: RequestDescriptor) -> Self {
        Self {
            descriptor,
            interval: None,
            initial_data: None,
            on_success: None,
        }
    }

    /// Set polling period
    ///
    /// A zero period is treated as "not polling".
    #[must_use = "builder methods must be chained or built"]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = normalize_interval(Some(interval));
        self
    }

    /// Set data exposed before the first response
    #[must_use = "builder methods must be chained or built"]
    pub fn with_initial_data(mut self, data: Value) -> Self {
        self.initial_data = Some(data);
        self
    }

    /// Set completion callback
    #[must_use = "builder methods must be chained or built"]
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: Fn(&RequestResult) + Send + Sync + 'static,
    {
        self.on_success = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for PollingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollingConfig")
            .field("descriptor", &self.descriptor)
            .field("interval", &self.interval)
            .field("initial_data", &self.initial_data)
            .field("on_success", &self.on_success.is_some())
            .finish()
    }
}

/// Zero periods mean "stopped"; a zero-period timer would spin.
pub(crate) fn normalize_interval(interval: Option<Duration>) -> Option<Duration> {
    interval.filter(|d| !d.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_interval_means_stopped() {
        let config = PollingConfig::new(RequestDescriptor::get("/x")).with_interval(Duration::ZERO);
        assert_eq!(config.interval, None);
    }

    #[test]
    fn debug_hides_callback() {
        let config = PollingConfig::new(RequestDescriptor::get("/x")).on_success(|_| {});
        assert!(format!("{config:?}").contains("on_success: true"));
    }
}
