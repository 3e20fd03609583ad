//! Ready-made configurations

use super::{Config, DisplayConfig, Format};

impl Config {
    /// Read `BEACON_LOG` (falling back to `RUST_LOG`), `BEACON_LOG_FORMAT`,
    /// `BEACON_LOG_SOURCE` and `BEACON_LOG_COLORS`
    ///
    /// An unrecognized format leaves the default in place.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = var("BEACON_LOG").or_else(|| var("RUST_LOG")) {
            config.level = level;
        }
        if let Some(format) = var("BEACON_LOG_FORMAT").and_then(|f| f.parse().ok()) {
            config.format = format;
        }
        config.display.apply_env(&var);
        config
    }

    /// Debug level, pretty output with source locations
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                source: true,
                ..DisplayConfig::default()
            },
            reloadable: true,
        }
    }

    /// Info level, flattened JSON without colors
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                flatten: true,
                ..DisplayConfig::default()
            },
            reloadable: false,
        }
    }
}
