//! Values bound to a schema.
//!
//! A [`TypedValue`] pairs a borrowed [`Value`] with the [`Schema`] and the
//! [`TypeRef`] it is expected to conform to. Validation walks the value once,
//! collecting every shape mismatch, and can report leaf field paths along
//! the way (see [`validate`]).

mod errors;
mod validate;

pub use errors::{ValidationError, ValidationErrors};
pub use validate::validate;

use crate::fieldpath::{Path, Set};
use crate::schema::{Schema, TypeRef};
use crate::value::Value;

/// A value together with the schema type it claims to have.
///
/// Both the value and the schema are borrowed and never mutated, so many
/// typed values can share one schema concurrently.
#[derive(Debug, Clone)]
pub struct TypedValue<'a> {
    value: &'a Value,
    schema: &'a Schema,
    type_ref: TypeRef,
}

impl<'a> TypedValue<'a> {
    /// Binds `value` to `type_ref` without checking it.
    #[must_use]
    pub fn new(value: &'a Value, schema: &'a Schema, type_ref: TypeRef) -> Self {
        Self {
            value,
            schema,
            type_ref,
        }
    }

    /// Binds `value` to `type_ref`, validating it first.
    ///
    /// # Errors
    ///
    /// Returns every validation error found if `value` does not conform.
    pub fn as_typed(
        value: &'a Value,
        schema: &'a Schema,
        type_ref: TypeRef,
    ) -> Result<Self, ValidationErrors> {
        let tv = Self::new(value, schema, type_ref);
        tv.validate().into_result()?;
        Ok(tv)
    }

    #[must_use]
    pub fn value(&self) -> &'a Value {
        self.value
    }

    #[must_use]
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    #[must_use]
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    /// Returns every shape mismatch between the value and its type.
    #[must_use]
    pub fn validate(&self) -> ValidationErrors {
        validate(self, None)
    }

    /// Like [`validate`](Self::validate), calling `leaf` once per leaf path.
    pub fn validate_with_leaves(&self, leaf: &mut dyn FnMut(&Path)) -> ValidationErrors {
        validate(self, Some(leaf))
    }

    /// Returns the set of leaf field paths of this value, as determined by
    /// its schema.
    ///
    /// # Errors
    ///
    /// Returns the validation errors if the value does not conform; a
    /// partial set is never returned.
    pub fn to_field_set(&self) -> Result<Set, ValidationErrors> {
        let mut set = Set::new();
        let errs = self.validate_with_leaves(&mut |path: &Path| {
            set.insert(path.clone());
        });
        errs.into_result()?;
        Ok(set)
    }
}
