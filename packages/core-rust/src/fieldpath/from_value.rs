//! Schema-less decomposition of a value into leaf field paths.
//!
//! Without a schema there is no way to tell atomic containers from granular
//! ones, so every map and list is decomposed. List elements are addressed by
//! key when they look keyed (see [`guess_best_list_path_element`]) and by
//! position otherwise.

use super::element::{KeyFields, PathElement};
use super::path::Path;
use super::set::Set;
use crate::config::ExtractorConfig;
use crate::value::Value;

/// Returns the path of every leaf in `value`, using the default candidate
/// key fields.
#[must_use]
pub fn extract_field_paths(value: &Value) -> Set {
    extract_field_paths_with(value, &ExtractorConfig::default())
}

/// Returns the path of every leaf in `value`.
///
/// Leaves are scalars (including null). A bare scalar at the root has no
/// path and yields an empty set, as do empty containers.
#[must_use]
pub fn extract_field_paths_with(value: &Value, config: &ExtractorConfig) -> Set {
    let mut set = Set::new();
    let walker = ObjectWalker {
        path: Path::root(),
        value,
    };
    walker.walk(config, &mut |path| {
        set.insert(path);
    });
    tracing::debug!(leaves = set.len(), "extracted field paths");
    set
}

/// Guesses whether `item` is an associative list element, which should be
/// referenced by key, or a positional one.
///
/// A map element carrying any of the candidate fields with a non-null scalar
/// value is keyed by all such fields, in candidate order. Anything else is
/// referenced by `index`.
#[must_use]
pub fn guess_best_list_path_element(
    config: &ExtractorConfig,
    index: usize,
    item: &Value,
) -> PathElement {
    // Non-map items could be set members or positional entries; no guess.
    let Value::Map(map) = item else {
        return PathElement::Index(index);
    };

    let keys: Vec<(String, Value)> = config
        .candidate_key_fields
        .iter()
        .filter_map(|name| {
            let field = map.get(name)?;
            (field.is_scalar() && !field.is_null()).then(|| (name.clone(), field.clone()))
        })
        .collect();

    if keys.is_empty() {
        PathElement::Index(index)
    } else {
        PathElement::Key(KeyFields::new(keys))
    }
}

/// Traversal state for one node. Each child gets a fresh walker.
struct ObjectWalker<'a> {
    path: Path,
    value: &'a Value,
}

impl<'a> ObjectWalker<'a> {
    fn descend(&self, element: PathElement, value: &'a Value) -> Self {
        Self {
            path: self.path.child(element),
            value,
        }
    }

    fn walk(self, config: &ExtractorConfig, leaf: &mut dyn FnMut(Path)) {
        match self.value {
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    let element = guess_best_list_path_element(config, i, item);
                    self.descend(element, item).walk(config, leaf);
                }
            }
            Value::Map(map) => {
                for (name, item) in map.iter() {
                    self.descend(PathElement::FieldName(name.to_string()), item)
                        .walk(config, leaf);
                }
            }
            _ => {
                if !self.path.is_empty() {
                    leaf(self.path);
                }
            }
        }
    }
}
