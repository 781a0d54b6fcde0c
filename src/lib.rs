//! # Property Steps
//!
//! Property resolution, typed value parsing and value comparison for
//! behavior-driven test assertions against tree-shaped data.
//!
//! A scenario keeps its data (API responses, fixtures, intermediate values)
//! in a [`World`]. Step handlers address values by short property references
//! such as `roles[0] of user`, build expected values from `type value`
//! strings such as `number-array 1,2,3`, and assert on the result.
//!
//! ## Modules
//!
//! - [`value`] - In-memory tree of maps, lists, scalars, blobs and file handles
//! - [`fieldpath`] - Property reference parsing and get/set/remove on a tree
//! - [`typed`] - Parser registry, default parsers and format validators
//! - [`compare`] - Structural and checksum-based comparison
//! - [`world`] - The per-scenario context and its assertion operations

pub mod compare;
pub mod error;
pub mod fieldpath;
pub mod typed;
pub mod value;
pub mod world;

pub use compare::{
    ChecksumAlgorithm, ChecksumEncoding, ChecksumOptions, CompareMode, ContainsMode, FormatMode,
};
pub use error::StepError;
pub use fieldpath::{Path, PathElement};
pub use typed::{FormatValidatorRegistry, ParserRegistry};
pub use value::Value;
pub use world::{World, WorldBuilder};
