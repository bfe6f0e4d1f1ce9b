use std::fmt;

use crate::fieldpath::Path;

/// A shape mismatch at a particular field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Location of the offending node. Empty for the root.
    pub path: Path,
    /// Human-readable description. Not meant to be parsed.
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(path: Path, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every error found in one validation pass, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }

    /// `Ok(())` when no errors were collected.
    ///
    /// # Errors
    ///
    /// Returns `self` if it holds at least one error.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => f.write_str("no errors"),
            [only] => write!(f, "{only}"),
            all => {
                f.write_str("errors:")?;
                for e in all {
                    write!(f, "\n  - {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_error_renders_alone() {
        let errs = ValidationErrors::from(ValidationError::new(
            Path::root().field("a"),
            "expected string, got integer 1",
        ));
        assert_eq!(errs.to_string(), ".a: expected string, got integer 1");
    }

    #[test]
    fn root_error_omits_path() {
        let e = ValidationError::new(Path::root(), "no type found matching: t");
        assert_eq!(e.to_string(), "no type found matching: t");
    }

    #[test]
    fn multiple_errors_render_as_bullets() {
        let errs: ValidationErrors = [
            ValidationError::new(Path::root().field("a"), "first"),
            ValidationError::new(Path::root().index(1), "second"),
        ]
        .into_iter()
        .collect();
        assert_eq!(errs.to_string(), "errors:\n  - .a: first\n  - [1]: second");
    }

    #[test]
    fn into_result() {
        assert_eq!(ValidationErrors::new().into_result(), Ok(()));
        let errs = ValidationErrors::from(ValidationError::new(Path::root(), "bad"));
        assert_eq!(errs.clone().into_result(), Err(errs));
    }

    #[test]
    fn extend_preserves_order() {
        let mut errs = ValidationErrors::new();
        errs.push(ValidationError::new(Path::root(), "one"));
        errs.extend(vec![ValidationError::new(Path::root(), "two")]);
        let messages: Vec<_> = errs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["one", "two"]);
    }
}
