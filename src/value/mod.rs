//! Value module - In-memory representation of the tree under test.
//!
//! Values are JSON/YAML shaped, plus binary blobs and file handles.

mod value;

pub use value::*;
