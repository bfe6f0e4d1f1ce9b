//! Type schema describing the shape of structured values.
//!
//! A [`Schema`] maps type names to [`Atom`]s. Atoms refer to their children
//! through [`TypeRef`]s, which are either inline atoms or names to look up.
//! Schemas are immutable once built and can be shared across threads.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named atoms available to [`TypeRef::Named`] lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Type name -> atom, in definition order.
    #[serde(default)]
    pub types: IndexMap<String, Atom>,
}

/// Error resolving a [`TypeRef`] against a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("no type found matching: {name}")]
    UnknownType { name: String },
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a named type.
    #[must_use]
    pub fn with_type(mut self, name: impl Into<String>, atom: Atom) -> Self {
        self.types.insert(name.into(), atom);
        self
    }

    #[must_use]
    pub fn find_named_type(&self, name: &str) -> Option<&Atom> {
        self.types.get(name)
    }

    /// Resolves a type reference to a concrete atom.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownType`] if a named reference does not
    /// match any type in this schema.
    pub fn resolve<'a>(&'a self, type_ref: &'a TypeRef) -> Result<&'a Atom, ResolveError> {
        match type_ref {
            TypeRef::Inline(atom) => Ok(atom.as_ref()),
            TypeRef::Named(name) => self
                .find_named_type(name)
                .ok_or_else(|| ResolveError::UnknownType { name: name.clone() }),
        }
    }
}

/// Reference to an atom: inline, or by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeRef {
    #[serde(rename = "namedType")]
    Named(String),
    Inline(Box<Atom>),
}

impl TypeRef {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    #[must_use]
    pub fn inline(atom: Atom) -> Self {
        TypeRef::Inline(Box::new(atom))
    }
}

/// A concrete type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Atom {
    Scalar(Scalar),
    Struct(Struct),
    List(List),
    Map(Map),
    Untyped(Untyped),
}

/// Scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scalar {
    /// Integer or floating point.
    Numeric,
    String,
    Boolean,
}

impl Scalar {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Scalar::Numeric => "numeric",
            Scalar::String => "string",
            Scalar::Boolean => "boolean",
        }
    }
}

/// How the children of a container relate to the container for field path
/// purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementRelationship {
    /// The container and everything below it is one leaf.
    Atomic,
    /// List elements are addressed by key or by their own value, not position.
    Associative,
    /// Children are decomposed individually.
    #[default]
    Separate,
}

/// A struct: named, optional fields, each with its own type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Struct {
    #[serde(default)]
    pub fields: Vec<StructField>,
    #[serde(default)]
    pub element_relationship: ElementRelationship,
}

impl Struct {
    /// Looks up a declared field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One declared struct field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl StructField {
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }
}

/// A list of uniformly typed elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub element_type: TypeRef,
    #[serde(default)]
    pub element_relationship: ElementRelationship,
    /// Key field names of an associative list of maps. Empty for sets.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keys: Vec<String>,
}

/// A map from arbitrary names to uniformly typed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Map {
    pub element_type: TypeRef,
    #[serde(default)]
    pub element_relationship: ElementRelationship,
}

/// Opaque data with no shape constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Untyped {
    #[serde(default = "atomic")]
    pub element_relationship: ElementRelationship,
}

impl Default for Untyped {
    fn default() -> Self {
        Self {
            element_relationship: ElementRelationship::Atomic,
        }
    }
}

fn atomic() -> ElementRelationship {
    ElementRelationship::Atomic
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn string_type() -> TypeRef {
        TypeRef::inline(Atom::Scalar(Scalar::String))
    }

    // ---- Resolution ----

    #[test]
    fn resolve_inline() {
        let schema = Schema::new();
        let tr = string_type();
        assert_eq!(schema.resolve(&tr), Ok(&Atom::Scalar(Scalar::String)));
    }

    #[test]
    fn resolve_named() {
        let schema = Schema::new().with_type("num", Atom::Scalar(Scalar::Numeric));
        let tr = TypeRef::named("num");
        assert_eq!(schema.resolve(&tr), Ok(&Atom::Scalar(Scalar::Numeric)));
    }

    #[test]
    fn resolve_unknown_name_is_an_error() {
        let schema = Schema::new();
        let err = schema.resolve(&TypeRef::named("ghost")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnknownType {
                name: "ghost".into()
            }
        );
        assert_eq!(err.to_string(), "no type found matching: ghost");
    }

    #[test]
    fn with_type_replaces_existing_definition() {
        let schema = Schema::new()
            .with_type("t", Atom::Scalar(Scalar::String))
            .with_type("t", Atom::Scalar(Scalar::Boolean));
        assert_eq!(schema.types.len(), 1);
        assert_eq!(
            schema.find_named_type("t"),
            Some(&Atom::Scalar(Scalar::Boolean))
        );
    }

    // ---- Defaults ----

    #[test]
    fn relationship_defaults() {
        assert_eq!(ElementRelationship::default(), ElementRelationship::Separate);
        assert_eq!(
            Untyped::default().element_relationship,
            ElementRelationship::Atomic
        );
        assert_eq!(
            Struct::default().element_relationship,
            ElementRelationship::Separate
        );
    }

    #[test]
    fn struct_field_lookup() {
        let s = Struct {
            fields: vec![StructField::new("a", string_type())],
            ..Struct::default()
        };
        assert!(s.field("a").is_some());
        assert!(s.field("b").is_none());
    }

    // ---- Serde ----

    #[test]
    fn deserializes_from_json() {
        let schema: Schema = serde_json::from_value(json!({
            "types": {
                "pod": {"struct": {"fields": [
                    {"name": "name", "type": {"inline": {"scalar": "string"}}},
                    {"name": "containers", "type": {"namedType": "containers"}},
                    {"name": "labels", "type": {"inline": {"map": {
                        "elementType": {"inline": {"scalar": "string"}}
                    }}}},
                    {"name": "extra", "type": {"inline": {"untyped": {}}}},
                ]}},
                "containers": {"list": {
                    "elementType": {"namedType": "container"},
                    "elementRelationship": "associative",
                    "keys": ["name"],
                }},
                "container": {"struct": {
                    "fields": [],
                    "elementRelationship": "atomic",
                }},
            }
        }))
        .expect("schema parses");

        let Some(Atom::Struct(pod)) = schema.find_named_type("pod") else {
            panic!("pod should be a struct");
        };
        assert_eq!(pod.fields.len(), 4);
        assert_eq!(pod.element_relationship, ElementRelationship::Separate);
        assert_eq!(
            pod.field("containers").map(|f| &f.type_ref),
            Some(&TypeRef::named("containers"))
        );
        assert_eq!(
            pod.field("extra").map(|f| &f.type_ref),
            Some(&TypeRef::inline(Atom::Untyped(Untyped::default())))
        );

        let Some(Atom::List(list)) = schema.find_named_type("containers") else {
            panic!("containers should be a list");
        };
        assert_eq!(list.element_relationship, ElementRelationship::Associative);
        assert_eq!(list.keys, vec!["name"]);

        let Some(Atom::Struct(container)) = schema.find_named_type("container") else {
            panic!("container should be a struct");
        };
        assert_eq!(container.element_relationship, ElementRelationship::Atomic);
    }

    #[test]
    fn serde_roundtrip_preserves_schema() {
        let schema = Schema::new().with_type(
            "list",
            Atom::List(List {
                element_type: TypeRef::inline(Atom::Scalar(Scalar::Numeric)),
                element_relationship: ElementRelationship::Associative,
                keys: vec![],
            }),
        );
        let text = serde_json::to_string(&schema).expect("serialize");
        let back: Schema = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, schema);
    }
}
