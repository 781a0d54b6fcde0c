//! Core value types and operations.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::path::{Path, PathBuf};

/// Value represents a node of the tree under test.
///
/// Besides the JSON/YAML shapes it can hold binary blobs and handles to
/// files on disk; both are compared by content checksum. Blobs serialize as
/// base64 strings and read back as [`Value::String`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    /// Empty list slot left behind by a removal or by writing past the end
    /// of a list. Reads as absent and serializes as null.
    #[serde(skip_deserializing)]
    Undefined,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Map(Map),
    #[serde(serialize_with = "serialize_bytes")]
    Bytes(Vec<u8>),
    File(FileHandle),
}

fn serialize_bytes<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64.encode(bytes))
}

/// Map is a string-keyed mapping that keeps insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Map {
    pub fields: IndexMap<String, Value>,
}

/// FileHandle refers to file content that is read when needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub path: PathBuf,
}

impl FileHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileHandle { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file synchronously.
    pub fn read(&self) -> std::io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns true for binary blobs and file handles.
    pub fn is_file_like(&self) -> bool {
        matches!(self, Value::Bytes(_) | Value::File(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Run-time type tag of the value.
    ///
    /// Lists, maps and file-like values all report `"object"`; callers that
    /// need to tell lists apart must use [`Value::is_list`].
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Int(_) | Value::Float(_) => "number",
            Value::String(_) => "string",
            Value::List(_) | Value::Map(_) | Value::Bytes(_) | Value::File(_) => "object",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Undefined, Value::Undefined) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::File(a), Value::File(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

impl Map {
    pub fn new() -> Self {
        Map {
            fields: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Inserts or overwrites a key. An existing key keeps its position.
    pub fn set(&mut self, key: String, value: Value) {
        self.fields.insert(key, value);
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Removes a key, keeping the order of the remaining ones.
    pub fn delete(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Map {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<FileHandle> for Value {
    fn from(f: FileHandle) -> Self {
        Value::File(f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Undefined => write!(f, "undefined"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => write!(f, "{:?}", s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(m) => {
                write!(f, "{{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{:?}:{}", k, v)?;
                }
                write!(f, "}}")
            }
            Value::Bytes(bytes) => {
                write!(f, "<Buffer")?;
                for b in bytes {
                    write!(f, " {:02x}", b)?;
                }
                write!(f, ">")
            }
            Value::File(handle) => write!(f, "<File {}>", handle.path.display()),
        }
    }
}

/// Parse a value from JSON.
pub fn from_json(json: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(json)
}

/// Serialize a value to JSON.
pub fn to_json(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// Serialize a value to indented JSON.
pub fn to_json_pretty(value: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// Parse a value from YAML.
pub fn from_yaml(yaml: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Serialize a value to YAML.
pub fn to_yaml(value: &Value) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_value_types() {
        assert!(Value::Null.is_null());
        assert!(Value::Bool(true).is_bool());
        assert!(Value::Int(42).is_int());
        assert!(Value::Float(3.5).is_float());
        assert!(Value::String("hello".into()).is_string());
        assert!(Value::List(vec![]).is_list());
        assert!(Value::Map(Map::new()).is_map());
        assert!(Value::Bytes(vec![1]).is_file_like());
        assert!(Value::File(FileHandle::new("a.bin")).is_file_like());
        assert!(!Value::String("a.bin".into()).is_file_like());
    }

    #[test]
    fn test_type_tags() {
        assert_eq!(Value::Int(1).type_tag(), "number");
        assert_eq!(Value::Float(1.5).type_tag(), "number");
        assert_eq!(Value::from("x").type_tag(), "string");
        assert_eq!(Value::Bool(false).type_tag(), "boolean");
        assert_eq!(Value::List(vec![]).type_tag(), "object");
        assert_eq!(Value::Map(Map::new()).type_tag(), "object");
        assert_eq!(Value::Bytes(vec![]).type_tag(), "object");
    }

    #[test]
    fn test_map_operations() {
        let mut map = Map::new();
        assert!(map.is_empty());

        map.set("key".into(), Value::String("value".into()));
        assert!(!map.is_empty());
        assert!(map.has("key"));
        assert_eq!(map.get("key"), Some(&Value::String("value".into())));

        map.delete("key");
        assert!(!map.has("key"));
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let mut map = Map::new();
        map.set("zeta".into(), Value::Int(1));
        map.set("alpha".into(), Value::Int(2));
        map.set("mid".into(), Value::Int(3));
        map.set("zeta".into(), Value::Int(4));
        map.delete("alpha");

        let keys: Vec<&str> = map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "mid"]);
        assert_eq!(map.get("zeta"), Some(&Value::Int(4)));
    }

    #[test]
    fn test_json_roundtrip() {
        let value = Value::Map(Map::from_iter([
            ("name", Value::from("test")),
            ("count", Value::Int(42)),
            ("ratio", Value::Float(0.5)),
        ]));

        let json = to_json(&value).unwrap();
        assert_eq!(json, r#"{"name":"test","count":42,"ratio":0.5}"#);
        let parsed = from_json(&json).unwrap();
        assert_eq!(value, parsed);
    }

    #[test]
    fn test_yaml_loading() {
        let value = from_yaml("user:\n  roles: [admin, dev]\n").unwrap();
        let user = value.as_map().unwrap().get("user").unwrap();
        let roles = user.as_map().unwrap().get("roles").unwrap();
        assert_eq!(
            roles,
            &Value::List(vec![Value::from("admin"), Value::from("dev")])
        );
    }

    #[test]
    fn test_bytes_serialize_as_base64() {
        let value = Value::Map(Map::from_iter([("blob", Value::Bytes(b"hi".to_vec()))]));
        let json = to_json(&value).unwrap();
        assert_eq!(json, r#"{"blob":"aGk="}"#);
        assert_eq!(
            from_json(&json).unwrap(),
            Value::Map(Map::from_iter([("blob", Value::from("aGk="))]))
        );
    }

    #[test]
    fn test_undefined_serializes_as_null() {
        let value = Value::List(vec![Value::Undefined, Value::Int(1)]);
        assert_eq!(to_json(&value).unwrap(), "[null,1]");
        assert_eq!(Value::Undefined.type_tag(), "undefined");
    }

    #[test]
    fn test_display() {
        let value = Value::Map(Map::from_iter([
            ("a", Value::List(vec![Value::Int(1), Value::Null])),
            ("b", Value::Bytes(vec![0x0a, 0xff])),
        ]));
        assert_eq!(format!("{}", value), r#"{"a":[1,null],"b":<Buffer 0a ff>}"#);
    }
}
