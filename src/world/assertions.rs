//! Assertion operations used by step handlers.
//!
//! Every check returns `Ok(())` once it has completed and the assertion
//! holds, or the first error it hits.

use super::World;
use crate::compare::{
    self, find_missing, is_match, render, CompareMode, ContainsMode, FormatMode,
};
use crate::error::StepError;
use crate::typed::split_format_descriptor;
use crate::value::{Map, Value};
use tracing::{debug, info, trace};

/// Type tag that checks for a list instead of comparing type names.
const ARRAY_TYPE: &str = "array";

impl World {
    /// Parses `value_string` and writes the result at `reference`.
    pub fn set_property_from_string(
        &mut self,
        reference: &str,
        value_string: &str,
    ) -> Result<(), StepError> {
        info!("Step: I set property {} to {}", reference, value_string);
        let value = self.parse_value_string(value_string)?;
        self.set_property(reference, value);
        Ok(())
    }

    /// Checks that the property equals (or does not equal) a parsed value.
    pub fn check_property(
        &self,
        reference: &str,
        mode: CompareMode,
        value_string: &str,
    ) -> Result<(), StepError> {
        info!("Step: I check property {} {} {}", reference, mode, value_string);
        let actual = self.get_property(reference);
        let expected = self.parse_value_string(value_string)?;
        compare::compare(reference, actual, Some(&expected), mode, &self.checksum)
    }

    /// Checks that the list at `actual_ref` contains every member of the
    /// list at `expected_ref`, in any order. With [`ContainsMode::Only`]
    /// both lists must also have the same length.
    pub fn check_contains_members(
        &self,
        actual_ref: &str,
        mode: ContainsMode,
        expected_ref: &str,
    ) -> Result<(), StepError> {
        info!(
            ?mode,
            "Step: I check property {} contains the members of {}", actual_ref, expected_ref
        );
        let actual = self.get_property(actual_ref);
        let expected = self.get_property(expected_ref);

        let (actual_list, expected_list) = match (
            actual.and_then(Value::as_list),
            expected.and_then(Value::as_list),
        ) {
            (Some(a), Some(e)) => (a, e),
            (a, e) => {
                debug!(
                    actual_is_array = a.is_some(),
                    expected_is_array = e.is_some(),
                    "Conditions not met."
                );
                let property = if a.is_none() { actual_ref } else { expected_ref };
                return Err(StepError::invalid_operand(
                    property,
                    "\"contains\" checks only apply to arrays",
                ));
            }
        };

        if mode == ContainsMode::Only && actual_list.len() != expected_list.len() {
            return Err(StepError::mismatch(
                actual_ref,
                "arrays do not have the same length",
                expected_list.len().to_string(),
                actual_list.len().to_string(),
            ));
        }

        match find_missing(actual_list, expected_list) {
            Some(member) => Err(StepError::mismatch(
                actual_ref,
                "expected member not found in actual array",
                member.to_string(),
                render(actual),
            )),
            None => Ok(()),
        }
    }

    /// Checks that the list at `reference` holds an element whose `name`
    /// property matches the parsed value.
    pub fn check_contains_object(
        &self,
        reference: &str,
        name: &str,
        value_string: &str,
    ) -> Result<(), StepError> {
        info!(
            "Step: I check property {} contains an object with a property named {} of {}",
            reference, name, value_string
        );
        let actual = self.get_property(reference);
        let expected = self.parse_value_string(value_string)?;

        let Some(list) = actual.and_then(Value::as_list) else {
            debug!(is_array = false, "Conditions not met.");
            return Err(StepError::invalid_operand(
                reference,
                "\"contains\" checks only apply to arrays",
            ));
        };

        let check = Value::Map(Map::from_iter([(name, expected)]));
        if list.iter().any(|element| is_match(element, &check)) {
            Ok(())
        } else {
            Err(StepError::mismatch(
                reference,
                "no element matches",
                check.to_string(),
                render(actual),
            ))
        }
    }

    /// Checks the run-time type tag of the property.
    ///
    /// `array` is special-cased to check for a list, since lists report the
    /// generic `object` tag. Absent properties report `undefined`.
    pub fn check_type(&self, reference: &str, expected: &str) -> Result<(), StepError> {
        info!("Step: I check property {} has type {}", reference, expected);
        let value = self.get_property(reference);
        let actual = value.map(Value::type_tag).unwrap_or("undefined");

        let holds = if expected == ARRAY_TYPE {
            value.is_some_and(Value::is_list)
        } else {
            trace!(expected, actual, "Comparing types.");
            actual == expected
        };

        if holds {
            Ok(())
        } else {
            Err(StepError::mismatch(reference, "wrong type", expected, actual))
        }
    }

    /// Checks the property against a named format validator.
    ///
    /// The descriptor is `base` or `base sub-format`. An unregistered base
    /// format fails before the property is read.
    pub fn check_format(
        &self,
        reference: &str,
        mode: FormatMode,
        descriptor: &str,
    ) -> Result<(), StepError> {
        info!(?mode, "Step: I check property {} format {}", reference, descriptor);
        let (base, sub_format) = split_format_descriptor(descriptor);
        let validator = self
            .format_validators
            .get(base)
            .ok_or_else(|| StepError::unknown_format(base))?;

        let value = self.get_property(reference);
        trace!(
            format = base,
            extension = ?sub_format,
            property = %render(value),
            "Checking format."
        );
        let is_valid = validator(value, sub_format);

        match (mode, is_valid) {
            (FormatMode::Has, false) => Err(StepError::mismatch(
                reference,
                "property does not have format",
                descriptor,
                render(value),
            )),
            (FormatMode::HasNot, true) => Err(StepError::mismatch(
                reference,
                "property does have format",
                format!("not {}", descriptor),
                render(value),
            )),
            _ => Ok(()),
        }
    }

    /// Checks that the property is absent. Present null, false, zero or
    /// empty values fail.
    pub fn check_not_exists(&self, reference: &str) -> Result<(), StepError> {
        info!("Step: I check property {} does not exist", reference);
        match self.get_property(reference) {
            None => Ok(()),
            Some(value) => Err(StepError::mismatch(
                reference,
                "property exists",
                "undefined",
                value.to_string(),
            )),
        }
    }

    /// Checks that the property is a list with exactly `expected` elements.
    pub fn check_length(&self, reference: &str, expected: usize) -> Result<(), StepError> {
        info!("Step: I check property {} array has {} element(s)", reference, expected);
        let Some(list) = self.get_property(reference).and_then(Value::as_list) else {
            return Err(StepError::invalid_operand(reference, "property is not an array"));
        };
        if list.len() == expected {
            Ok(())
        } else {
            Err(StepError::mismatch(
                reference,
                "wrong number of elements",
                expected.to_string(),
                list.len().to_string(),
            ))
        }
    }
}
