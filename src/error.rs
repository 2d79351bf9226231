//! Error types for scorecard.

use std::path::Path;
use thiserror::Error;

/// Result type for scorecard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for scorecard operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Metrics were requested with zero recorded predictions.
    ///
    /// Callers should treat this as "nothing to report", not a fatal
    /// condition.
    #[error("no predictions to evaluate")]
    EmptyInput,

    /// Prediction and ground-truth sequences differ in length.
    ///
    /// This indicates a caller bug; sequences are never silently truncated.
    #[error("length mismatch: {predicted} predictions vs {actual} ground-truth labels")]
    LengthMismatch {
        /// Number of predicted labels supplied.
        predicted: usize,
        /// Number of ground-truth labels supplied.
        actual: usize,
    },

    /// A label is not part of the active category roster.
    #[error("unknown category '{label}' (roster: {roster})")]
    UnknownCategory {
        /// The offending label.
        label: String,
        /// Comma-separated roster, for the error message.
        roster: String,
    },

    /// Invalid input provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration, surfaced at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Parse error (malformed prediction file, report, or store file).
    #[error("parse error: {0}")]
    Parse(String),

    /// A report or ground-truth file could not be written or read.
    ///
    /// The destination of a failed write is left untouched.
    #[error("persistence error for {path}: {message}")]
    Persistence {
        /// File the operation targeted.
        path: String,
        /// Underlying failure description.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Error::InvalidConfig(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Create an unknown category error.
    pub fn unknown_category(label: impl Into<String>, roster: &[String]) -> Self {
        Error::UnknownCategory {
            label: label.into(),
            roster: roster.join(", "),
        }
    }

    /// Create a persistence error for a path.
    pub fn persistence(path: &Path, err: impl std::fmt::Display) -> Self {
        Error::Persistence {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
