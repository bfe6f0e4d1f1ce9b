//! Schema-directed validation.
//!
//! The walker checks that a value conforms to its schema and reports the
//! path of every leaf it passes on the way. Errors are accumulated across the
//! whole tree; a branch that cannot be checked is pruned while its siblings
//! are still walked.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::errors::{ValidationError, ValidationErrors};
use super::TypedValue;
use crate::fieldpath::{KeyFields, Path, PathElement};
use crate::schema::{self, Atom, ElementRelationship, Scalar, Schema, TypeRef};
use crate::value::Value;

/// Validates `tv` against its schema.
///
/// If `leaf` is given it is called once for every leaf position: scalars,
/// atomic structs/lists/maps, and untyped nodes. Nothing beneath an atomic
/// node is reported, and the root itself is never reported.
pub fn validate(tv: &TypedValue<'_>, mut leaf: Option<&mut dyn FnMut(&Path)>) -> ValidationErrors {
    let mut leaves = 0usize;
    let mut counting = |path: &Path| {
        leaves += 1;
        if let Some(cb) = leaf.as_deref_mut() {
            cb(path);
        }
    };
    let errs = ValidatingObjectWalker {
        path: Path::root(),
        value: tv.value(),
        schema: tv.schema(),
        type_ref: tv.type_ref(),
        in_leaf: false,
    }
    .validate(&mut counting);
    debug!(leaves, errors = errs.len(), "validated value");
    errs
}

/// Why a list element could not be given a path element.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ListElementError {
    #[error("associative list with keys may not have a null element")]
    NullKeyedElement,
    #[error("associative list with keys may not have non-map elements")]
    NonMapKeyedElement,
    #[error("associative list with keys has an element that omits key field {0}")]
    MissingKeyField(String),
    #[error("associative list without keys has an element that's a map type")]
    MapSetElement,
    #[error("not supported: associative list with lists as elements")]
    ListSetElement,
    #[error("associative list without keys has an element that's an explicit null")]
    NullSetElement,
}

/// Traversal state for one node. Children get a copy with the path, value,
/// and type reference replaced, so siblings never see each other's state.
struct ValidatingObjectWalker<'a> {
    path: Path,
    value: &'a Value,
    schema: &'a Schema,
    type_ref: &'a TypeRef,
    /// Set once this branch has reported a leaf; deeper leaves are part of it.
    in_leaf: bool,
}

impl<'a> ValidatingObjectWalker<'a> {
    fn descend(&self, element: PathElement, value: &'a Value, type_ref: &'a TypeRef) -> Self {
        Self {
            path: self.path.child(element),
            value,
            schema: self.schema,
            type_ref,
            in_leaf: self.in_leaf,
        }
    }

    fn error(&self, message: impl Into<String>) -> ValidationError {
        ValidationError::new(self.path.clone(), message)
    }

    fn validate(self, leaf: &mut dyn FnMut(&Path)) -> ValidationErrors {
        let atom = match self.schema.resolve(self.type_ref) {
            Ok(atom) => atom,
            Err(e) => {
                trace!(path = %self.path, error = %e, "pruning unresolvable branch");
                return self.error(e.to_string()).into();
            }
        };

        match atom {
            Atom::Scalar(t) => self.do_scalar(*t, leaf),
            Atom::Struct(t) => self.do_struct(t, leaf),
            Atom::List(t) => self.do_list(t, leaf),
            Atom::Map(t) => self.do_map(t, leaf),
            Atom::Untyped(t) => self.do_untyped(t, leaf),
        }
    }

    fn do_leaf(&mut self, leaf: &mut dyn FnMut(&Path)) {
        if self.in_leaf {
            return;
        }
        self.in_leaf = true;
        if !self.path.is_empty() {
            leaf(&self.path);
        }
    }

    fn do_scalar(mut self, t: Scalar, leaf: &mut dyn FnMut(&Path)) -> ValidationErrors {
        let ok = match t {
            Scalar::Numeric => matches!(self.value, Value::Int(_) | Value::Float(_)),
            Scalar::String => matches!(self.value, Value::String(_)),
            Scalar::Boolean => matches!(self.value, Value::Bool(_)),
        };
        if !ok {
            let expected = match t {
                Scalar::Numeric => "numeric (int or float)",
                other => other.name(),
            };
            return self
                .error(format!("expected {expected}, got {}", self.value.describe()))
                .into();
        }

        self.do_leaf(leaf);
        ValidationErrors::new()
    }

    fn do_struct(mut self, t: &'a schema::Struct, leaf: &mut dyn FnMut(&Path)) -> ValidationErrors {
        let map = match self.value {
            Value::Null => None,
            Value::Map(m) => Some(m),
            other => {
                return self
                    .error(format!("expected struct, got {}", other.describe()))
                    .into()
            }
        };

        if t.element_relationship == ElementRelationship::Atomic {
            self.do_leaf(leaf);
            return ValidationErrors::new();
        }

        let Some(map) = map else {
            return ValidationErrors::new();
        };

        let mut errs = ValidationErrors::new();
        let mut declared = HashSet::with_capacity(t.fields.len());
        for field in &t.fields {
            declared.insert(field.name.as_str());
            // All fields are optional.
            let Some(child) = map.get(&field.name) else {
                continue;
            };
            errs.extend(
                self.descend(PathElement::FieldName(field.name.clone()), child, &field.type_ref)
                    .validate(leaf),
            );
        }

        // Unknown fields are rejected.
        for (name, _) in map.iter() {
            if !declared.contains(name) {
                errs.push(self.error(format!("field {name} is not mentioned in the schema")));
            }
        }

        errs
    }

    fn do_list(mut self, t: &'a schema::List, leaf: &mut dyn FnMut(&Path)) -> ValidationErrors {
        let items = match self.value {
            Value::Null => None,
            Value::List(items) => Some(items),
            other => {
                return self
                    .error(format!("expected list, got {}", other.describe()))
                    .into()
            }
        };

        if t.element_relationship == ElementRelationship::Atomic {
            self.do_leaf(leaf);
            return ValidationErrors::new();
        }

        let Some(items) = items else {
            return ValidationErrors::new();
        };

        let mut errs = ValidationErrors::new();
        let mut observed: HashSet<PathElement> = HashSet::with_capacity(items.len());
        for (i, child) in items.iter().enumerate() {
            let element = match list_item_to_path_element(t, i, child) {
                Ok(element) => element,
                Err(e) => {
                    // No stable path exists to attribute deeper errors to.
                    trace!(path = %self.path, index = i, error = %e, "skipping list element");
                    errs.push(self.error(format!("element {i}: {e}")));
                    continue;
                }
            };
            if !observed.insert(element.clone()) {
                errs.push(self.error(format!("duplicate entries for key {element}")));
            }
            errs.extend(self.descend(element, child, &t.element_type).validate(leaf));
        }

        errs
    }

    fn do_map(mut self, t: &'a schema::Map, leaf: &mut dyn FnMut(&Path)) -> ValidationErrors {
        let map = match self.value {
            Value::Null => None,
            Value::Map(m) => Some(m),
            other => {
                return self
                    .error(format!("expected map, got {}", other.describe()))
                    .into()
            }
        };

        if t.element_relationship == ElementRelationship::Atomic {
            self.do_leaf(leaf);
            return ValidationErrors::new();
        }

        let Some(map) = map else {
            return ValidationErrors::new();
        };

        let mut errs = ValidationErrors::new();
        for (name, child) in map.iter() {
            errs.extend(
                self.descend(PathElement::FieldName(name.to_string()), child, &t.element_type)
                    .validate(leaf),
            );
        }
        errs
    }

    fn do_untyped(mut self, t: &schema::Untyped, leaf: &mut dyn FnMut(&Path)) -> ValidationErrors {
        // Untyped data is opaque: no shape checks, no descent.
        if t.element_relationship == ElementRelationship::Atomic {
            self.do_leaf(leaf);
        }
        ValidationErrors::new()
    }
}

fn list_item_to_path_element(
    list: &schema::List,
    index: usize,
    child: &Value,
) -> Result<PathElement, ListElementError> {
    if list.element_relationship != ElementRelationship::Associative {
        return Ok(PathElement::Index(index));
    }
    if list.keys.is_empty() {
        set_item_to_path_element(child)
    } else {
        keyed_item_to_path_element(&list.keys, child)
    }
}

fn keyed_item_to_path_element(
    keys: &[String],
    child: &Value,
) -> Result<PathElement, ListElementError> {
    let map = match child {
        Value::Null => return Err(ListElementError::NullKeyedElement),
        Value::Map(m) => m,
        _ => return Err(ListElementError::NonMapKeyedElement),
    };
    let fields = keys
        .iter()
        .map(|name| {
            map.get(name)
                .map(|v| (name.clone(), v.clone()))
                .ok_or_else(|| ListElementError::MissingKeyField(name.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(PathElement::Key(KeyFields::new(fields)))
}

fn set_item_to_path_element(child: &Value) -> Result<PathElement, ListElementError> {
    match child {
        Value::Map(_) => Err(ListElementError::MapSetElement),
        Value::List(_) => Err(ListElementError::ListSetElement),
        Value::Null => Err(ListElementError::NullSetElement),
        scalar => Ok(PathElement::Value(scalar.clone())),
    }
}
