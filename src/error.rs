//! Error type shared by all property operations and assertions.

use std::path::PathBuf;
use thiserror::Error;

/// StepError aborts the assertion or operation that raised it.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("unknown type: {type_tag}")]
    UnknownType { type_tag: String },

    #[error("unknown format validator: {format}")]
    UnknownFormat { format: String },

    #[error("property {property}: {message}")]
    InvalidOperand { property: String, message: String },

    #[error("property {property}: {message}: expected {expected}, actual {actual}")]
    AssertionMismatch {
        property: String,
        message: String,
        expected: String,
        actual: String,
    },

    #[error("cannot parse {text:?} as {type_tag}: {message}")]
    Parse {
        type_tag: String,
        text: String,
        message: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StepError {
    /// Creates an unknown type error.
    pub fn unknown_type(type_tag: impl Into<String>) -> Self {
        StepError::UnknownType {
            type_tag: type_tag.into(),
        }
    }

    /// Creates an unknown format error.
    pub fn unknown_format(format: impl Into<String>) -> Self {
        StepError::UnknownFormat {
            format: format.into(),
        }
    }

    /// Creates an invalid operand error.
    pub fn invalid_operand(property: impl Into<String>, message: impl Into<String>) -> Self {
        StepError::InvalidOperand {
            property: property.into(),
            message: message.into(),
        }
    }

    /// Creates an assertion mismatch error.
    pub fn mismatch(
        property: impl Into<String>,
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        StepError::AssertionMismatch {
            property: property.into(),
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a parse error.
    pub fn parse(
        type_tag: impl Into<String>,
        text: impl Into<String>,
        message: impl ToString,
    ) -> Self {
        StepError::Parse {
            type_tag: type_tag.into(),
            text: text.into(),
            message: message.to_string(),
        }
    }

    /// Creates an I/O error for the given file.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StepError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this is an assertion mismatch.
    pub fn is_mismatch(&self) -> bool {
        matches!(self, StepError::AssertionMismatch { .. })
    }
}
