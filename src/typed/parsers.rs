//! Default type parsers.

use super::parser::ParserRegistry;
use crate::error::StepError;
use crate::value::{FileHandle, Value};
use crate::world::World;

/// Registers the default parsers:
///
/// | tag        | result                                            |
/// |------------|---------------------------------------------------|
/// | `string`   | the text itself                                   |
/// | `number`   | an integer when the text is one, else a float     |
/// | `int`      | an integer                                        |
/// | `float`    | a float                                           |
/// | `boolean`  | `true` or `false`                                 |
/// | `null`     | null, the text is ignored                         |
/// | `json`     | a JSON document                                   |
/// | `property` | the current value of another property, or null   |
/// | `buffer`   | the UTF-8 bytes of the text                       |
/// | `file`     | a handle to a file below the world's base dir     |
pub fn register_defaults(registry: &mut ParserRegistry) {
    registry.register("string", |text, _| Ok(Value::from(text)));
    registry.register("number", |text, _| parse_number(text));
    registry.register("int", |text, _| {
        text.trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|e| StepError::parse("int", text, e))
    });
    registry.register("float", |text, _| {
        text.trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| StepError::parse("float", text, e))
    });
    registry.register("boolean", |text, _| match text.trim() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => Err(StepError::parse("boolean", text, "expected true or false")),
    });
    registry.register("null", |_, _| Ok(Value::Null));
    registry.register("json", |text, _| {
        crate::value::from_json(text).map_err(|e| StepError::parse("json", text, e))
    });
    registry.register("property", |text, world: &World| {
        Ok(world.get_property(text.trim()).cloned().unwrap_or_default())
    });
    registry.register("buffer", |text, _| Ok(Value::Bytes(text.as_bytes().to_vec())));
    registry.register("file", |text, world: &World| {
        Ok(Value::File(FileHandle::new(world.base_dir().join(text.trim()))))
    });
}

fn parse_number(text: &str) -> Result<Value, StepError> {
    let trimmed = text.trim();
    if let Ok(i) = trimmed.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    trimmed
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|e| StepError::parse("number", text, e))
}
