//! Registry of named format validators.

use crate::value::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// A format validator. Receives the value under test (absent values are
/// `None`) and the optional sub-format of the descriptor.
pub type ValidatorFn = Arc<dyn Fn(Option<&Value>, Option<&str>) -> bool + Send + Sync>;

/// FormatValidatorRegistry maps base format names to validators.
///
/// No validators are built in; callers register the formats their
/// scenarios use.
#[derive(Clone, Default)]
pub struct FormatValidatorRegistry {
    validators: BTreeMap<String, ValidatorFn>,
}

impl FormatValidatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        FormatValidatorRegistry::default()
    }

    /// Registers a validator, replacing any previous one for the name.
    pub fn register<F>(&mut self, format: impl Into<String>, validator: F)
    where
        F: Fn(Option<&Value>, Option<&str>) -> bool + Send + Sync + 'static,
    {
        self.validators.insert(format.into(), Arc::new(validator));
    }

    /// Returns the validator for the base format name.
    pub fn get(&self, format: &str) -> Option<&ValidatorFn> {
        self.validators.get(format)
    }

    /// Returns the registered format names in sorted order.
    pub fn format_names(&self) -> Vec<&str> {
        self.validators.keys().map(|k| k.as_str()).collect()
    }
}

impl fmt::Debug for FormatValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatValidatorRegistry")
            .field("formats", &self.format_names())
            .finish()
    }
}

/// Splits a format descriptor such as `date YYYY-MM-DD` into the base
/// format and the optional sub-format. The sub-format is everything after
/// the first space.
pub fn split_format_descriptor(descriptor: &str) -> (&str, Option<&str>) {
    match descriptor.split_once(' ') {
        Some((base, rest)) => (base, (!rest.is_empty()).then_some(rest)),
        None => (descriptor, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_format_descriptor() {
        assert_eq!(split_format_descriptor("email"), ("email", None));
        assert_eq!(
            split_format_descriptor("date YYYY-MM-DD"),
            ("date", Some("YYYY-MM-DD"))
        );
        assert_eq!(
            split_format_descriptor("date D MMM YYYY"),
            ("date", Some("D MMM YYYY"))
        );
        assert_eq!(split_format_descriptor("uuid "), ("uuid", None));
    }

    #[test]
    fn test_register_and_call() {
        let mut registry = FormatValidatorRegistry::new();
        registry.register("nonEmpty", |value, _| {
            value.and_then(Value::as_str).is_some_and(|s| !s.is_empty())
        });

        let validator = registry.get("nonEmpty").unwrap();
        assert!(validator(Some(&Value::from("x")), None));
        assert!(!validator(Some(&Value::from("")), None));
        assert!(!validator(None, None));
        assert!(registry.get("email").is_none());
    }
}
