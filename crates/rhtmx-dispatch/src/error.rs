// File: src/error.rs
// Purpose: Error types for route compilation and response construction

use thiserror::Error;

/// Errors raised while compiling route patterns or assembling responses
///
/// Dispatching itself never fails: "not found" and "method not allowed" are
/// ordinary [`Response`](crate::Response) variants, not errors.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// A `{` with no matching `}`
    #[error("unterminated parameter in pattern {pattern:?} at byte {position}")]
    UnterminatedParameter { pattern: String, position: usize },

    /// Parameter names must match `[A-Za-z][A-Za-z0-9_-]*`
    #[error("invalid parameter name {name:?} in pattern {pattern:?}")]
    InvalidParameterName { pattern: String, name: String },

    #[error("parameter {name:?} declared more than once in pattern {pattern:?}")]
    DuplicateParameter { pattern: String, name: String },

    /// A `)` without an opening `(`, or a `(` that is never closed
    #[error("unbalanced optional segment in pattern {pattern:?} at byte {position}")]
    UnbalancedOptional { pattern: String, position: usize },

    /// A custom parameter regex that the regex engine rejected
    #[error("invalid regex in pattern {pattern:?}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid status {0}, expected one of: 0, 1, 2")]
    InvalidStatus(i64),

    #[error("inconsistent response: {0}")]
    InconsistentResponse(&'static str),
}

pub type Result<T> = std::result::Result<T, DispatchError>;
