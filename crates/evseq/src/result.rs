//! Result and error types for Evseq.
//!
//! A failed sequence is a verdict, not an error: validation always returns a
//! boolean or a report. These errors cover the edges around the engine only
//! (grammar notation, configuration, trace files and table lookups).

use thiserror::Error;

/// Result type for Evseq operations
pub type EvseqResult<T> = Result<T, EvseqError>;

/// Errors that can occur in Evseq
#[derive(Debug, Error)]
pub enum EvseqError {
    /// An event kind name did not match any known kind
    #[error("Unknown event kind: {name}")]
    UnknownEventKind {
        /// The name that failed to parse
        name: String,
    },

    /// Grammar notation could not be parsed
    #[error("Invalid grammar at term {position}: {message}")]
    GrammarParse {
        /// Zero-based term position in the notation
        position: usize,
        /// Error message
        message: String,
    },

    /// No grammar is registered for the requested device and target shape
    #[error("No grammar for {device} on a {shape} target ({platform})")]
    NoGrammar {
        /// Device class name
        device: String,
        /// Target shape name
        shape: String,
        /// Platform name
        platform: String,
    },

    /// A named value (platform, device, shape) was not recognized
    #[error("Unknown {what}: {value}")]
    UnknownValue {
        /// What kind of value was expected
        what: &'static str,
        /// The value that failed to parse
        value: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl EvseqError {
    /// Create a grammar parse error
    #[must_use]
    pub fn grammar(position: usize, message: impl Into<String>) -> Self {
        Self::GrammarParse {
            position,
            message: message.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an unknown-value error
    #[must_use]
    pub fn unknown(what: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownValue {
            what,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_error_display() {
        let err = EvseqError::grammar(3, "empty kind");
        assert_eq!(err.to_string(), "Invalid grammar at term 3: empty kind");
    }

    #[test]
    fn test_no_grammar_display() {
        let err = EvseqError::NoGrammar {
            device: "Touch".to_string(),
            shape: "Hyperlink".to_string(),
            platform: "Wasm".to_string(),
        };
        assert!(err.to_string().contains("Touch"));
        assert!(err.to_string().contains("Hyperlink"));
    }

    #[test]
    fn test_io_from() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: EvseqError = io.into();
        assert!(matches!(err, EvseqError::Io(_)));
    }

    #[test]
    fn test_unknown_value() {
        let err = EvseqError::unknown("platform", "beos");
        assert_eq!(err.to_string(), "Unknown platform: beos");
    }
}
