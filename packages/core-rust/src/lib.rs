//! Structured merge core: values, schemas, and the field paths that identify
//! which parts of an object a writer owns.
//!
//! Two walkers turn a [`Value`] into a [`Set`] of leaf [`Path`]s:
//! - [`extract_field_paths`] guesses list keys without a schema;
//! - [`TypedValue::validate_with_leaves`] checks the value against a
//!   [`Schema`] and reports leaves as the schema defines them.

pub mod config;
pub mod fieldpath;
pub mod schema;
pub mod typed;
pub mod value;

pub use config::ExtractorConfig;
pub use fieldpath::{extract_field_paths, KeyFields, Path, PathElement, Set};
pub use schema::{Atom, ElementRelationship, ResolveError, Scalar, Schema, TypeRef};
pub use typed::{TypedValue, ValidationError, ValidationErrors};
pub use value::{Map, Value};
