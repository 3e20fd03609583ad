//! Error types for logger setup
use thiserror::Error;

/// Result type for logging operations
pub type LogResult<T> = std::result::Result<T, LogError>;

/// Errors raised while building or reloading the logger
#[derive(Error, Debug)]
pub enum LogError {
    /// The filter directive could not be parsed
    #[error("Invalid filter '{filter}': {reason}")]
    Filter {
        /// The rejected directive string
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber is already installed or could not be installed
    #[error("Failed to install subscriber: {0}")]
    Init(String),

    /// The reloadable filter layer is gone
    #[error("Failed to reload filter: {0}")]
    Reload(String),
}

impl LogError {
    /// Create a filter parsing error
    pub fn filter(filter: impl Into<String>, reason: impl ToString) -> Self {
        Self::Filter {
            filter: filter.into(),
            reason: reason.to_string(),
        }
    }
}
