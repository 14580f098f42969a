//! Error types for the CLI

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Invalid argument
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Error message
        message: String,
    },

    /// Trace file could not be loaded
    #[error("Failed to load trace {path}: {source}")]
    TraceLoad {
        /// Path of the trace file
        path: String,
        /// Underlying error
        source: evseq::EvseqError,
    },

    /// JSON output error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Evseq library error
    #[error("Evseq error: {0}")]
    Evseq(#[from] evseq::EvseqError),
}

impl CliError {
    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a trace load error
    #[must_use]
    pub fn trace_load(path: impl Into<String>, source: evseq::EvseqError) -> Self {
        Self::TraceLoad {
            path: path.into(),
            source,
        }
    }
}
