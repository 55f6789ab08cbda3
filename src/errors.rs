//! Shared error types for scoring and planning

use thiserror::Error;

/// Main error type for powerrank operations
///
/// Per-reading data problems are not errors: they travel with the record as
/// [`DataQualityIssue`](crate::records::DataQualityIssue) values. Everything
/// here aborts the single call that produced it.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown metric, incomplete multiplier map, or a config file that
    /// failed validation
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller supplied an argument outside the accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic errors with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV reader errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// TOML parse errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// TOML render errors
    #[error(transparent)]
    TomlSer(#[from] toml::ser::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self::WithContext {
            context: context.into(),
            message: self.to_string(),
        }
    }

    /// Whether the error stems from configuration rather than input data
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Toml(_))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_error_displays_message() {
        let err = Error::configuration("Unknown metric: foo_pct");
        assert_eq!(err.to_string(), "Configuration error: Unknown metric: foo_pct");
        assert!(err.is_configuration());
    }

    #[test]
    fn context_wraps_message() {
        let result: Result<()> = Err(Error::invalid_argument("days_in_period must be > 0"));
        let err = result.context("pacing").unwrap_err();
        assert_eq!(
            err.to_string(),
            "pacing: Invalid argument: days_in_period must be > 0"
        );
        assert!(!err.is_configuration());
    }
}
