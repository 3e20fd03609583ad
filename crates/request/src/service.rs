//! Request normalization over an injected transport

use std::fmt;
use std::sync::Arc;

use crate::config::PollingConfig;
use crate::descriptor::RequestDescriptor;
use crate::error::RequestError;
use crate::poller::Poller;
use crate::result::RequestResult;
use crate::transport::Transport;

/// Entry point: sends normalized requests and creates pollers
///
/// Cloning is cheap; clones share the transport.
pub struct RequestService<T: ?Sized> {
    transport: Arc<T>,
}

impl<T: Transport> RequestService<T> {
    /// Wrap a transport
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }
}

impl<T: Transport + ?Sized> RequestService<T> {
    /// Wrap an already shared transport
    pub fn from_arc(transport: Arc<T>) -> Self {
        Self { transport }
    }

    /// The underlying transport
    pub fn transport(&self) -> &Arc<T> {
        &self.transport
    }

    /// Send one request and normalize its outcome
    ///
    /// Never fails: every failure mode is folded into
    /// [`RequestResult::error`]. No retries happen here.
    #[tracing::instrument(
        name = "request.send",
        skip_all,
        fields(
            method = %descriptor.method,
            path = %descriptor.path,
            action_type = descriptor.action_type.as_deref(),
        )
    )]
    pub async fn send(&self, descriptor: &RequestDescriptor) -> RequestResult {
        let outcome = self
            .transport
            .dispatch(&descriptor.method, &descriptor.path, descriptor.body.as_ref())
            .await;

        match outcome {
            Ok(response) => match response.data {
                Some(data) => RequestResult::ok(data),
                None => RequestResult::err(RequestError::MissingPayload {
                    status_text: response.status_text,
                }),
            },
            Err(err) => RequestResult::err(err),
        }
    }
}

impl<T: Transport + ?Sized + 'static> RequestService<T> {
    /// Attach a poller to the configured target
    ///
    /// Sends immediately and, when the config carries an interval, keeps
    /// sending on that cadence until the poller is detached or dropped.
    /// Must be called from within a Tokio runtime.
    pub fn use_request(&self, config: PollingConfig) -> Poller<T> {
        Poller::attach(self.clone(), config)
    }
}

impl<T: ?Sized> Clone for RequestService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
        }
    }
}

impl<T: ?Sized> fmt::Debug for RequestService<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestService").finish_non_exhaustive()
    }
}
