//! Layered CLI settings: defaults → TOML file → `BEACON_*` env → flags

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use beacon_log::Format;
use beacon_request::HttpTransportConfig;
use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// File picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "beacon.toml";

/// Resolved settings for one invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// `[http]` table
    pub http: HttpTransportConfig,
    /// Log filter; `BEACON_LOG` / `RUST_LOG` apply when unset
    pub log_level: Option<String>,
    /// Log format; `BEACON_LOG_FORMAT` applies when unset
    pub log_format: Option<Format>,
    /// Use the development logging preset instead of the environment
    pub dev_log: bool,
}

impl Settings {
    /// Resolve settings for `cli`
    ///
    /// Nested keys come from the environment with `__` as separator, e.g.
    /// `BEACON_HTTP__BASE_URL`.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) if !path.is_file() => bail!("config file {} not found", path.display()),
            Some(path) => Some(path.clone()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };

        let mut settings = Self::figment(file.as_deref())
            .extract::<Self>()
            .context("failed to resolve configuration")?;

        if let Some(url) = &cli.base_url {
            settings.http.base_url.clone_from(url);
        }
        if let Some(timeout) = cli.timeout {
            settings.http.timeout = timeout;
        }
        if cli.log_level.is_some() {
            settings.log_level.clone_from(&cli.log_level);
        }
        if cli.log_format.is_some() {
            settings.log_format = cli.log_format;
        }
        settings.dev_log |= cli.dev_log;
        Ok(settings)
    }

    fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = file {
            figment = figment.merge(Toml::file_exact(path));
        }
        figment.merge(Env::prefixed("BEACON_").split("__"))
    }

    /// Logger configuration: preset or environment, then these settings
    pub fn log_config(&self) -> beacon_log::Config {
        let mut config = if self.dev_log {
            beacon_log::Config::development()
        } else {
            beacon_log::Config::from_env()
        };
        if let Some(level) = &self.log_level {
            config.level.clone_from(level);
        }
        if let Some(format) = self.log_format {
            config.format = format;
        }
        config
    }
}
