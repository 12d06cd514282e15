use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error type for the extraction and export core.
///
/// Every variant is terminal: nothing in the core retries, and no partial
/// tables or documents survive a failure.
#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Classification of errors for logging and user display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// The extraction result or a table had the wrong shape.
    DataError,
    /// Writing the spreadsheet or CSV output failed.
    OutputError,
    /// The extraction provider failed or timed out.
    ProviderError,
    /// Invalid or missing configuration.
    ConfigError,
    /// The requested folder or document does not exist.
    UserError,
}

impl ExtractorError {
    /// Returns the broad error category for routing and display purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Shape(_) => ErrorCategory::DataError,
            Self::Export(_) => ErrorCategory::OutputError,
            Self::Upstream(_) => ErrorCategory::ProviderError,
            Self::Config(_) => ErrorCategory::ConfigError,
            Self::NotFound(_) => ErrorCategory::UserError,
        }
    }

    /// Returns a user-friendly message (hides internal details).
    pub fn user_message(&self) -> String {
        match self {
            Self::Shape(_) => "The extraction result was malformed.".into(),
            Self::Export(_) => "Could not write the output file. Check disk space and permissions.".into(),
            Self::Upstream(_) => "The extraction service failed. Try again later.".into(),
            Self::Config(msg) => format!("Configuration issue: {msg}"),
            Self::NotFound(msg) => format!("Not found: {msg}"),
        }
    }

    /// Wrap any provider failure as an opaque upstream error.
    pub fn upstream(err: impl std::fmt::Display) -> Self {
        Self::Upstream(err.to_string())
    }
}
