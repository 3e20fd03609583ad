//! Logger configuration

mod presets;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level filter (e.g., "info", "debug,hyper=warn")
    pub level: String,

    /// Output format
    pub format: Format,

    /// Display configuration
    pub display: DisplayConfig,

    /// Enable runtime reload capability
    pub reloadable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Compact,
            display: DisplayConfig::default(),
            reloadable: false,
        }
    }
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Human-readable with colors and indentation
    Pretty,
    /// Compact single-line output
    Compact,
    /// Structured JSON output
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty, compact or json)")),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// What each event line shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show source location (`file:line`)
    pub source: bool,
    /// Show target module
    pub target: bool,
    /// Show thread IDs
    pub thread_ids: bool,
    /// Use ANSI colors
    pub colors: bool,
    /// Flatten JSON events
    pub flatten: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            source: cfg!(debug_assertions),
            target: true,
            thread_ids: false,
            colors: std::io::IsTerminal::is_terminal(&std::io::stderr()),
            flatten: true,
        }
    }
}

impl DisplayConfig {
    /// Apply `BEACON_LOG_SOURCE` and `BEACON_LOG_COLORS`
    pub(super) fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(v) = var("BEACON_LOG_SOURCE") {
            self.source = parse_flag(&v);
        }
        if let Some(v) = var("BEACON_LOG_COLORS") {
            self.colors = parse_flag(&v);
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value != "0" && !value.eq_ignore_ascii_case("false")
}
