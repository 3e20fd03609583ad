//! # Beacon Log
//!
//! Builds and installs the global `tracing` subscriber for beacon
//! binaries: an `EnvFilter` (optionally reloadable at runtime) plus a
//! pretty, compact or JSON formatter writing to stderr.

pub mod builder;
pub mod config;
pub mod error;

pub use builder::{LoggerBuilder, LoggerGuard, ReloadHandle};
pub use config::{Config, DisplayConfig, Format};
pub use error::{LogError, LogResult};

/// Initialize from `BEACON_LOG` / `RUST_LOG` and `BEACON_LOG_FORMAT`
pub fn init() -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(Config::from_env()).build()
}

/// Initialize with an explicit configuration
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}
