//! Logger builder implementation

mod reload;

pub use reload::ReloadHandle;

use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard returned by [`LoggerBuilder::build`]
///
/// Holds the reload handle when the filter was built reloadable.
#[derive(Debug)]
pub struct LoggerGuard {
    reload_handle: Option<ReloadHandle>,
}

impl LoggerGuard {
    /// Handle for changing the filter at runtime, if enabled
    pub fn reload_handle(&self) -> Option<&ReloadHandle> {
        self.reload_handle.as_ref()
    }
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Override the filter directive
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config.level = level.into();
        self
    }

    /// Override the output format
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.config.format = format;
        self
    }

    /// Build and install the global subscriber
    ///
    /// Events go to stderr so stdout stays free for command output.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter =
            EnvFilter::try_new(&self.config.level).map_err(|e| LogError::filter(&self.config.level, e))?;

        let (filter_layer, reload_handle): (Box<dyn Layer<Registry> + Send + Sync>, _) =
            if self.config.reloadable {
                let (layer, handle) = ReloadHandle::wrap(filter, &self.config.level);
                (Box::new(layer), Some(handle))
            } else {
                (Box::new(filter), None)
            };

        let display = &self.config.display;
        let registry = Registry::default().with(filter_layer);

        let installed = match self.config.format {
            Format::Pretty => registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr)
                        .with_ansi(display.colors)
                        .with_target(display.target)
                        .with_thread_ids(display.thread_ids)
                        .with_file(display.source)
                        .with_line_number(display.source),
                )
                .try_init(),
            Format::Compact => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_writer(std::io::stderr)
                        .with_ansi(display.colors)
                        .with_target(display.target)
                        .with_thread_ids(display.thread_ids)
                        .with_file(display.source)
                        .with_line_number(display.source),
                )
                .try_init(),
            Format::Json => registry
                .with(
                    fmt::layer()
                        .json()
                        .flatten_event(display.flatten)
                        .with_current_span(true)
                        .with_writer(std::io::stderr)
                        .with_target(display.target)
                        .with_thread_ids(display.thread_ids)
                        .with_file(display.source)
                        .with_line_number(display.source),
                )
                .try_init(),
        };
        installed.map_err(|e| LogError::Init(e.to_string()))?;

        Ok(LoggerGuard { reload_handle })
    }
}
