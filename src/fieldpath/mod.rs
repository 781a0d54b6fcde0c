//! Field path module - Addresses nested values by property reference.
//!
//! A property reference like `roles[0] of user` is parsed into a [`Path`]
//! which can then be used to read, write and remove values in a tree.

mod path;
mod tree;

pub use path::*;
pub use tree::*;
