#![forbid(unsafe_code)]

//! Parse error type.

use std::fmt;

/// A constraint string could not be parsed.
///
/// Only the strict parsers return this; the lenient parsers skip bad options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintParseError {
    pub message: String,
}

impl ConstraintParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ConstraintParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "constraint parse error: {}", self.message)
    }
}

impl std::error::Error for ConstraintParseError {}

/// Result alias for the strict parsers.
pub type Result<T> = std::result::Result<T, ConstraintParseError>;
