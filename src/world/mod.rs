//! World module - The per-scenario context that assertions run against.
//!
//! A [`World`] owns the tree under test together with the parser registry,
//! the format validators and the checksum options. Step handlers receive it
//! explicitly and call the property and assertion operations on it.

mod assertions;

#[cfg(test)]
mod scenario_test;

use crate::compare::{self, ChecksumOptions, CompareMode};
use crate::error::StepError;
use crate::fieldpath::{self, Path};
use crate::typed::{split_value_string, FormatValidatorRegistry, ParserRegistry};
use crate::value::{Map, Value};
use std::path::{Path as FsPath, PathBuf};
use tracing::debug;

/// Label used in messages for comparisons that are not tied to a property.
const ANONYMOUS_PROPERTY: &str = "<value>";

/// World is the context object of a single scenario.
#[derive(Debug, Clone)]
pub struct World {
    root: Value,
    parsers: ParserRegistry,
    format_validators: FormatValidatorRegistry,
    checksum: ChecksumOptions,
    base_dir: PathBuf,
}

impl Default for World {
    fn default() -> Self {
        World::new()
    }
}

impl World {
    /// Creates a world with an empty root map and the default parsers.
    pub fn new() -> Self {
        WorldBuilder::new().build()
    }

    /// Creates a new WorldBuilder.
    pub fn builder() -> WorldBuilder {
        WorldBuilder::new()
    }

    /// Returns the tree under test.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Returns the tree under test for direct mutation.
    pub fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    /// Consumes the world and returns its tree.
    pub fn into_root(self) -> Value {
        self.root
    }

    pub fn parsers(&self) -> &ParserRegistry {
        &self.parsers
    }

    pub fn parsers_mut(&mut self) -> &mut ParserRegistry {
        &mut self.parsers
    }

    pub fn format_validators(&self) -> &FormatValidatorRegistry {
        &self.format_validators
    }

    pub fn format_validators_mut(&mut self) -> &mut FormatValidatorRegistry {
        &mut self.format_validators
    }

    pub fn checksum_options(&self) -> &ChecksumOptions {
        &self.checksum
    }

    /// Directory that relative file references are resolved against.
    pub fn base_dir(&self) -> &FsPath {
        &self.base_dir
    }

    /// Returns the value at the property reference, or `None` if absent.
    pub fn get_property(&self, reference: &str) -> Option<&Value> {
        let path = Path::parse(reference);
        debug!(%path, "Getting property.");
        fieldpath::get(&self.root, &path)
    }

    /// Writes a value at the property reference, creating intermediate
    /// containers as needed.
    pub fn set_property(&mut self, reference: &str, value: impl Into<Value>) {
        let path = Path::parse(reference);
        let value = value.into();
        debug!(%path, %value, "Setting property.");
        fieldpath::set(&mut self.root, &path, value);
    }

    /// Removes the value at the property reference and returns it. Nothing
    /// happens when the parent is absent.
    pub fn remove_property(&mut self, reference: &str) -> Option<Value> {
        let path = Path::parse(reference);
        debug!(%path, "Removing property.");
        fieldpath::remove(&mut self.root, &path)
    }

    /// Parses a `type value` string such as `number-array 1,2,3`.
    pub fn parse_value_string(&self, text: &str) -> Result<Value, StepError> {
        let (type_tag, value) = split_value_string(text);
        self.parse(type_tag, value)
    }

    /// Parses `text` with the parser registered for `type_tag`.
    pub fn parse(&self, type_tag: &str, text: Option<&str>) -> Result<Value, StepError> {
        self.parsers.parse(type_tag, text, self)
    }

    /// Compares two values with this world's checksum options.
    pub fn compare(
        &self,
        actual: Option<&Value>,
        expected: Option<&Value>,
        mode: CompareMode,
    ) -> Result<(), StepError> {
        compare::compare(ANONYMOUS_PROPERTY, actual, expected, mode, &self.checksum)
    }
}

/// WorldBuilder is a builder for creating a World.
#[derive(Debug, Clone)]
pub struct WorldBuilder {
    root: Value,
    parsers: ParserRegistry,
    format_validators: FormatValidatorRegistry,
    checksum: ChecksumOptions,
    base_dir: PathBuf,
}

impl Default for WorldBuilder {
    fn default() -> Self {
        WorldBuilder::new()
    }
}

impl WorldBuilder {
    /// Creates a builder with the default parsers and no format validators.
    pub fn new() -> Self {
        WorldBuilder {
            root: Value::Map(Map::new()),
            parsers: ParserRegistry::with_defaults(),
            format_validators: FormatValidatorRegistry::new(),
            checksum: ChecksumOptions::default(),
            base_dir: PathBuf::from("."),
        }
    }

    /// Sets the initial tree.
    pub fn root(mut self, root: Value) -> Self {
        self.root = root;
        self
    }

    /// Replaces the whole parser registry.
    pub fn parsers(mut self, parsers: ParserRegistry) -> Self {
        self.parsers = parsers;
        self
    }

    /// Registers one additional parser.
    pub fn parser<F>(mut self, type_tag: impl Into<String>, parser: F) -> Self
    where
        F: Fn(&str, &World) -> Result<Value, StepError> + Send + Sync + 'static,
    {
        self.parsers.register(type_tag, parser);
        self
    }

    /// Replaces the whole format validator registry.
    pub fn format_validators(mut self, validators: FormatValidatorRegistry) -> Self {
        self.format_validators = validators;
        self
    }

    /// Registers one format validator.
    pub fn format_validator<F>(mut self, format: impl Into<String>, validator: F) -> Self
    where
        F: Fn(Option<&Value>, Option<&str>) -> bool + Send + Sync + 'static,
    {
        self.format_validators.register(format, validator);
        self
    }

    /// Sets the checksum options used for file-like comparisons.
    pub fn checksum(mut self, options: ChecksumOptions) -> Self {
        self.checksum = options;
        self
    }

    /// Sets the directory that relative file references resolve against.
    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    /// Builds the World.
    pub fn build(self) -> World {
        World {
            root: self.root,
            parsers: self.parsers,
            format_validators: self.format_validators,
            checksum: self.checksum,
            base_dir: self.base_dir,
        }
    }
}
