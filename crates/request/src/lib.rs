//! # Beacon Request
//!
//! Request normalization and interval polling over an injected transport.
//!
//! - [`RequestService::send`] issues one request and folds every outcome
//!   into a [`RequestResult`]. It never fails and never retries.
//! - [`RequestService::use_request`] attaches a [`Poller`] that sends
//!   immediately, optionally repeats on an interval, and exposes a
//!   [`PollingState`] that completions from a detached or retargeted
//!   attachment can never overwrite.
//!
//! ```no_run
//! use std::time::Duration;
//! use beacon_request::{HttpTransport, HttpTransportConfig, PollingConfig, RequestDescriptor, RequestService};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(HttpTransportConfig::new("http://localhost:5601"))?;
//! let service = RequestService::new(transport);
//!
//! let poller = service.use_request(
//!     PollingConfig::new(RequestDescriptor::get("/api/watcher/watches"))
//!         .with_interval(Duration::from_secs(10)),
//! );
//! let mut updates = poller.subscribe();
//! updates.changed().await?;
//! println!("{:?}", poller.state().data);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
#[cfg(feature = "http")]
pub mod http_client;
pub mod poller;
pub mod result;
pub mod service;
pub mod state;
pub mod transport;

pub use config::{PollingConfig, SuccessCallback};
pub use descriptor::RequestDescriptor;
pub use error::{ConfigError, ConfigResult, ErrorResponse, RequestError, TransportError};
#[cfg(feature = "http")]
pub use http_client::{HttpTransport, HttpTransportConfig};
pub use poller::Poller;
pub use result::RequestResult;
pub use service::RequestService;
pub use state::PollingState;
pub use transport::{Transport, TransportResponse};

pub use http::Method;
