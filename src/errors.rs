//! Shared error types for method-order analysis

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for method-order operations
#[derive(Debug, Error)]
pub enum Error {
    /// The supplied class model is internally inconsistent
    #[error("Invalid class model: {message}")]
    InvalidModel { message: String },

    /// A method move would leave the valid index range
    #[error("Trying to move method #{index} by {shift} positions in a class of {len} methods")]
    IndexOutOfRange {
        index: usize,
        shift: isize,
        len: usize,
    },

    /// A positional lookup past the end of the ordering
    #[error("Method index {index} is out of range for {len} methods")]
    NoSuchIndex { index: usize, len: usize },

    /// A proposed permutation does not cover exactly the current method set
    #[error("New ordering contains another set of methods: current {current}, new {proposed}")]
    PermutationMismatch { current: String, proposed: String },

    /// Line translation for a line not covered by any method body
    #[error("Line #{line} does not lie within any method")]
    LineOutsideMethods { line: usize },

    /// Property name requested for a method that is neither getter nor setter
    #[error("The method {signature} is not an accessor")]
    NotAnAccessor { signature: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        path: Option<PathBuf>,
    },

    /// Errors raised by dependency information consumers
    #[error(transparent)]
    External(#[from] anyhow::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an invalid-model error
    pub fn invalid_model(message: impl Into<String>) -> Self {
        Self::InvalidModel {
            message: message.into(),
        }
    }

    /// Create a configuration error without file context
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error tied to a config file
    pub fn configuration_in(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Configuration {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// Errors that indicate a mismatch between the source model and its line
    /// data, or a broken permutation. These are never caused by configuration.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Self::LineOutsideMethods { .. } | Self::PermutationMismatch { .. }
        )
    }

    /// Errors the caller can fix by correcting its input.
    pub fn is_user_fixable(&self) -> bool {
        matches!(
            self,
            Self::InvalidModel { .. } | Self::Configuration { .. } | Self::Json(_) | Self::Toml(_)
        )
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_out_of_range_message() {
        let err = Error::IndexOutOfRange {
            index: 2,
            shift: 5,
            len: 4,
        };
        assert_eq!(
            err.to_string(),
            "Trying to move method #2 by 5 positions in a class of 4 methods"
        );
    }

    #[test]
    fn test_classification() {
        assert!(Error::LineOutsideMethods { line: 7 }.is_invariant_violation());
        assert!(!Error::LineOutsideMethods { line: 7 }.is_user_fixable());
        assert!(Error::invalid_model("duplicate signature").is_user_fixable());
        assert!(Error::configuration("bad weight").is_user_fixable());
        assert!(!Error::configuration("bad weight").is_invariant_violation());
    }

    #[test]
    fn test_external_errors_pass_through() {
        let err: Error = anyhow::anyhow!("consumer failed").into();
        assert_eq!(err.to_string(), "consumer failed");
    }
}
