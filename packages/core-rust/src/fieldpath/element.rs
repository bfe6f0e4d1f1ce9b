//! A single step from a parent node to one of its children.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::value::Value;

/// Identifies one child of a map or list node.
///
/// Variants never compare equal to each other: a field named `"0"` and the
/// list index `0` are different elements.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathElement {
    /// Descent into a map or struct field.
    FieldName(String),
    /// Positional descent into a list.
    Index(usize),
    /// Descent into a keyed associative list element.
    Key(KeyFields),
    /// Descent into a set element; the element is its own identity.
    Value(Value),
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::FieldName(name) => write!(f, ".{name}"),
            PathElement::Index(i) => write!(f, "[{i}]"),
            PathElement::Key(key) => write!(f, "[{key}]"),
            PathElement::Value(v) => write!(f, "[={v}]"),
        }
    }
}

/// The (name, value) pairs identifying an associative list element.
///
/// Pairs keep the order they were built in, but identity (equality,
/// hashing, display) uses the pairs sorted by name.
#[derive(Debug, Clone)]
pub struct KeyFields {
    fields: Vec<(String, Value)>,
}

impl KeyFields {
    #[must_use]
    pub fn new(fields: Vec<(String, Value)>) -> Self {
        Self { fields }
    }

    /// Pairs in construction order.
    #[must_use]
    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    /// Looks up the value of one key field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn sorted(&self) -> Vec<&(String, Value)> {
        let mut sorted: Vec<_> = self.fields.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(&b.0));
        sorted
    }
}

impl PartialEq for KeyFields {
    fn eq(&self, other: &Self) -> bool {
        self.fields.len() == other.fields.len() && self.sorted() == other.sorted()
    }
}

impl Eq for KeyFields {}

impl Hash for KeyFields {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sorted = self.sorted();
        sorted.len().hash(state);
        for (name, value) in sorted {
            name.hash(state);
            value.hash(state);
        }
    }
}

impl fmt::Display for KeyFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for KeyFields {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
