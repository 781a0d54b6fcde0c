//! Typed module - Turns `type value` strings into values.
//!
//! This module holds the parser registry, the default parsers and the
//! registry of format validators.

mod format;
mod parser;
mod parsers;

pub use format::*;
pub use parser::*;
pub use parsers::*;
