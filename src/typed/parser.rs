//! Parser registry turning `type value` strings into values.

use crate::error::StepError;
use crate::value::Value;
use crate::world::World;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Suffix marking a homogeneous list type, e.g. `number-array`.
pub const ARRAY_SUFFIX: &str = "-array";

/// Separator between list elements. Elements cannot contain it.
pub const ARRAY_SEPARATOR: char = ',';

/// A registered parser. Receives the textual value and the world it is
/// parsed for, so it may read other properties.
pub type ParserFn = Arc<dyn Fn(&str, &World) -> Result<Value, StepError> + Send + Sync>;

/// ParserRegistry maps type tags to parsers.
#[derive(Clone, Default)]
pub struct ParserRegistry {
    parsers: BTreeMap<String, ParserFn>,
}

impl ParserRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ParserRegistry::default()
    }

    /// Creates a registry holding the default parsers
    /// (see [`register_defaults`](super::register_defaults)).
    pub fn with_defaults() -> Self {
        let mut registry = ParserRegistry::new();
        super::parsers::register_defaults(&mut registry);
        registry
    }

    /// Registers a parser, replacing any previous parser for the tag.
    pub fn register<F>(&mut self, type_tag: impl Into<String>, parser: F)
    where
        F: Fn(&str, &World) -> Result<Value, StepError> + Send + Sync + 'static,
    {
        self.parsers.insert(type_tag.into(), Arc::new(parser));
    }

    /// Returns the parser for the tag.
    pub fn get(&self, type_tag: &str) -> Option<&ParserFn> {
        self.parsers.get(type_tag)
    }

    /// Returns the registered type tags in sorted order.
    pub fn type_names(&self) -> Vec<&str> {
        self.parsers.keys().map(|k| k.as_str()).collect()
    }

    /// Parses `text` as `type_tag`.
    ///
    /// Tags ending in `-array` split the text on `,` and parse every piece
    /// as the element type. Commas cannot be escaped. A missing text is
    /// handed to parsers as the empty string.
    pub fn parse(
        &self,
        type_tag: &str,
        text: Option<&str>,
        context: &World,
    ) -> Result<Value, StepError> {
        let text = text.unwrap_or("");

        if let Some(element_type) = type_tag.strip_suffix(ARRAY_SUFFIX) {
            trace!(element_type, text, "Parsing array value.");
            return text
                .split(ARRAY_SEPARATOR)
                .map(|piece| self.parse(element_type, Some(piece), context))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List);
        }

        let parser = self
            .get(type_tag)
            .ok_or_else(|| StepError::unknown_type(type_tag))?;
        (**parser)(text, context)
    }
}

impl fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}

/// Splits `type value` on the first run of whitespace.
///
/// The value part keeps any inner whitespace and is `None` when nothing
/// follows the type tag.
pub fn split_value_string(text: &str) -> (&str, Option<&str>) {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(end) => {
            let rest = text[end..].trim_start();
            (&text[..end], (!rest.is_empty()).then_some(rest))
        }
        None => (text, None),
    }
}
