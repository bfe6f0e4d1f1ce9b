//! Field paths: stable, order-independent identifiers for the leaves of a
//! value tree.
//!
//! A [`Path`] is a sequence of [`PathElement`]s from the root to a node. A
//! [`Set`] collects the paths of every leaf a writer touched, which is what
//! ownership tracking and three-way merge operate on. This module also holds
//! the schema-less extractor; the schema-directed one lives in
//! [`typed`](crate::typed).

mod element;
mod from_value;
mod path;
mod set;

pub use element::{KeyFields, PathElement};
pub use from_value::{extract_field_paths, extract_field_paths_with, guess_best_list_path_element};
pub use path::Path;
pub use set::Set;
