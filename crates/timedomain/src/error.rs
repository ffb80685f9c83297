//! Error types for time domain translation.
//!
//! Hard failures come in two layers: [`SyntaxError`] for text that does not
//! follow the bracket grammar, and [`ResolveError`] for well-formed patterns
//! whose codes or values cannot mean anything. Both surface to callers as the
//! single [`TimeDomainError::InvalidPattern`] classification.
//!
//! Unsupported-but-valid patterns are *not* errors; see
//! [`Resolution::Unsupported`](crate::Resolution::Unsupported).

use thiserror::Error;

use crate::code::CodeClass;
use crate::ContextId;

/// The bracket grammar or a group's token stream is malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// Group content does not split into `letter + digits` tokens.
    #[error("malformed token at position {position}: '{found}'")]
    MalformedToken {
        /// Byte offset of the offending token.
        position: usize,
        /// The text that failed to tokenize (truncated).
        found: String,
    },

    /// Outer brackets, operators or group arrangement are malformed.
    #[error("malformed pattern at position {position}: {message}")]
    MalformedStructure {
        /// Byte offset where parsing stopped.
        position: usize,
        /// Description of the error.
        message: String,
    },
}

impl SyntaxError {
    /// Returns the byte offset the error points at.
    pub fn position(&self) -> usize {
        match self {
            SyntaxError::MalformedToken { position, .. }
            | SyntaxError::MalformedStructure { position, .. } => *position,
        }
    }

    /// Moves the reported position by `offset` bytes.
    pub(crate) fn shifted(self, offset: usize) -> Self {
        match self {
            SyntaxError::MalformedToken { position, found } => SyntaxError::MalformedToken {
                position: position + offset,
                found,
            },
            SyntaxError::MalformedStructure { position, message } => {
                SyntaxError::MalformedStructure {
                    position: position + offset,
                    message,
                }
            }
        }
    }
}

/// A syntactically valid pattern carries codes or values that cannot be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A letter outside the recognized alphabet.
    #[error("unknown code '{code}'")]
    UnknownCode {
        /// The offending letter.
        code: char,
    },

    /// A braced duration group appears where the start group belongs.
    #[error("duration group appears before its start group")]
    WrongGroupOrder,

    /// A dimension has a start but no end or duration.
    #[error("{dimension} start has no matching end or duration")]
    MissingEnd {
        /// Dimension lacking its end.
        dimension: CodeClass,
    },

    /// A dimension has an end or duration but no start.
    #[error("{dimension} end or duration has no matching start")]
    MissingStart {
        /// Dimension lacking its start.
        dimension: CodeClass,
    },

    /// A value lies outside the domain of its dimension.
    #[error("value {value} out of range for '{code}'")]
    OutOfRange {
        /// The code letter.
        code: char,
        /// The rejected value.
        value: u32,
    },
}

/// Any hard failure of a single pattern.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Grammar failure.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// Resolution failure.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// Errors returned by the aggregation entry points.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeDomainError {
    /// A pattern could not be translated; the whole call is invalid.
    #[error("invalid time domain '{pattern}' for context {context_id}: {reason}")]
    InvalidPattern {
        /// Context the pattern belongs to.
        context_id: ContextId,
        /// Raw pattern text.
        pattern: String,
        /// Underlying failure.
        reason: PatternError,
    },
}

impl TimeDomainError {
    /// Returns the underlying pattern failure.
    pub fn reason(&self) -> &PatternError {
        match self {
            TimeDomainError::InvalidPattern { reason, .. } => reason,
        }
    }
}

/// Result type for time domain operations.
pub type TimeDomainResult<T> = std::result::Result<T, TimeDomainError>;
