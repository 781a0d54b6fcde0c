//! Compare module - Decides equality between actual and expected values.
//!
//! File-like values (binary blobs and file handles) are compared by content
//! checksum; everything else by deep structural equality.

mod checksum;
mod equality;

pub use checksum::*;
pub use equality::*;

use crate::error::StepError;
use crate::value::Value;
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Whether a comparison expects equality or inequality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareMode {
    Equals,
    NotEquals,
}

/// Whether a containment check allows extra actual members.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContainsMode {
    /// Every expected member is present; actual may hold more.
    #[default]
    Subset,
    /// Same length, and every expected member is present.
    Only,
}

/// Whether a format check is negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatMode {
    Has,
    HasNot,
}

/// Error returned when a mode keyword is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode: {0}")]
pub struct UnknownMode(pub String);

impl FromStr for CompareMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "equals" => Ok(CompareMode::Equals),
            "does not equals" | "does not equal" | "not-equals" => Ok(CompareMode::NotEquals),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

impl FromStr for ContainsMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Ok(ContainsMode::Subset),
            "only" => Ok(ContainsMode::Only),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

impl FromStr for FormatMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "has format" => Ok(FormatMode::Has),
            "does not have format" => Ok(FormatMode::HasNot),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareMode::Equals => write!(f, "equals"),
            CompareMode::NotEquals => write!(f, "does not equal"),
        }
    }
}

/// Renders an optional value for messages; absent values read `undefined`.
pub fn render(value: Option<&Value>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "undefined".to_string(),
    }
}

/// Compares `actual` against `expected`.
///
/// When both operands are file-like each is replaced by its checksum first,
/// so two distinct blobs or handles with the same bytes are equal. Fails
/// with [`StepError::AssertionMismatch`] naming `property` when the outcome
/// does not match `mode`.
pub fn compare(
    property: &str,
    actual: Option<&Value>,
    expected: Option<&Value>,
    mode: CompareMode,
    options: &ChecksumOptions,
) -> Result<(), StepError> {
    let (actual, expected) = match (actual, expected) {
        (Some(a), Some(e)) if a.is_file_like() && e.is_file_like() => {
            let a = checksum(a, options)?.map(Value::String);
            let e = checksum(e, options)?.map(Value::String);
            (a.map(Cow::Owned), e.map(Cow::Owned))
        }
        (a, e) => (a.map(Cow::Borrowed), e.map(Cow::Borrowed)),
    };
    let actual = actual.as_deref();
    let expected = expected.as_deref();

    trace!(
        property,
        expected = %render(expected),
        actual = %render(actual),
        %mode,
        "Comparing values."
    );

    let equal = match (actual, expected) {
        (Some(a), Some(e)) => deep_equal(a, e),
        (None, None) => true,
        _ => false,
    };

    match (mode, equal) {
        (CompareMode::Equals, false) => Err(StepError::mismatch(
            property,
            "values are not equal",
            render(expected),
            render(actual),
        )),
        (CompareMode::NotEquals, true) => Err(StepError::mismatch(
            property,
            "values are equal",
            format!("not {}", render(expected)),
            render(actual),
        )),
        _ => Ok(()),
    }
}
