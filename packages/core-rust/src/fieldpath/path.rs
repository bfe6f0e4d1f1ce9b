use std::fmt;

use super::element::{KeyFields, PathElement};
use crate::value::Value;

/// Location of a node in a value tree, as the sequence of steps from the
/// root. The empty path is the root itself.
///
/// Builder methods return a new path and leave the receiver untouched, so a
/// walker can hand each child its own path without sharing state with
/// siblings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathElement>);

impl Path {
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns this path extended by one element.
    #[must_use]
    pub fn child(&self, element: PathElement) -> Self {
        let mut elements = Vec::with_capacity(self.0.len() + 1);
        elements.extend_from_slice(&self.0);
        elements.push(element);
        Self(elements)
    }

    #[must_use]
    pub fn field(&self, name: impl Into<String>) -> Self {
        self.child(PathElement::FieldName(name.into()))
    }

    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(PathElement::Index(index))
    }

    #[must_use]
    pub fn key(&self, key: KeyFields) -> Self {
        self.child(PathElement::Key(key))
    }

    #[must_use]
    pub fn value(&self, value: Value) -> Self {
        self.child(PathElement::Value(value))
    }

    #[must_use]
    pub fn elements(&self) -> &[PathElement] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PathElement>> for Path {
    fn from(elements: Vec<PathElement>) -> Self {
        Self(elements)
    }
}

impl FromIterator<PathElement> for Path {
    fn from_iter<I: IntoIterator<Item = PathElement>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.0 {
            write!(f, "{element}")?;
        }
        Ok(())
    }
}
