use std::collections::HashSet;

use super::path::Path;

/// Deduplicating collection of paths.
///
/// Iteration order is unspecified; membership is the contract. Two sets are
/// equal when they hold the same paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Set {
    paths: HashSet<Path>,
}

impl Set {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path. Returns false if it was already present.
    pub fn insert(&mut self, path: Path) -> bool {
        self.paths.insert(path)
    }

    #[must_use]
    pub fn has(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }
}

impl FromIterator<Path> for Set {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Set {
    type Item = Path;
    type IntoIter = std::collections::hash_set::IntoIter<Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}
