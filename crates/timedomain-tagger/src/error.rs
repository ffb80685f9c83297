//! Error types for batch tagging.

use thiserror::Error;
use timedomain::TimeDomainError;

/// Errors that can occur while tagging features.
#[derive(Error, Debug)]
pub enum TaggerError {
    /// A feature carried a pattern that could not be interpreted.
    #[error("tagging failed: {0}")]
    Pattern(#[from] TimeDomainError),

    /// A line of tabular input could not be read as an entry.
    #[error("input line {line}: {message}")]
    InvalidInput {
        /// One-based line number.
        line: usize,
        /// What is wrong with the line.
        message: String,
    },

    /// Reading input failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tagger configuration is unusable.
    #[error("invalid tagger configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for tagger operations.
pub type TaggerResult<T> = std::result::Result<T, TaggerError>;
