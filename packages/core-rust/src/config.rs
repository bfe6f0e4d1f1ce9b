//! Configuration for the schema-less field path extractor.

/// Field names that mark a list element as keyed, in priority order.
pub const DEFAULT_CANDIDATE_KEY_FIELDS: [&str; 3] = ["key", "id", "name"];

/// Settings for [`extract_field_paths_with`](crate::fieldpath::extract_field_paths_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Field names considered keys if found with a scalar value in a list
    /// element. Synthesized keys follow this order, not the element's.
    pub candidate_key_fields: Vec<String>,
}

impl ExtractorConfig {
    /// Creates a config with a custom candidate list.
    #[must_use]
    pub fn with_candidate_key_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidate_key_fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self::with_candidate_key_fields(DEFAULT_CANDIDATE_KEY_FIELDS)
    }
}
