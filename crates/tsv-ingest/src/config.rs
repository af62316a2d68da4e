//! Decoder configuration.

use serde::{Deserialize, Serialize};
use tsv_model::NormalizationForm;

/// How header columns are matched to tagged fields when names collide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagPolicy {
    /// The first-declared field wins a duplicated tag, and the first header
    /// column wins a duplicated header name.
    #[default]
    FirstMatch,
    /// Duplicated tags or header names fail construction.
    Strict,
}

/// How a row that fails part-way through is written to the destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Each cell is written as soon as it is coerced. Fields mapped before a
    /// failing cell keep their new values.
    #[default]
    InPlace,
    /// Cells are staged and the record is written only if the whole row coerces.
    AllOrNothing,
}

/// Configuration captured when a decoder is constructed.
///
/// Empty strings disable the corresponding feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Separator for list-of-text fields. Empty disables splitting.
    pub list_delimiter: String,

    /// Cell content treated as an empty value. Empty disables substitution.
    pub null_sentinel: String,

    /// Normalization applied to text and list-of-text values.
    pub normalization: NormalizationForm,

    /// Resolution of duplicated tags and header names.
    pub tag_policy: TagPolicy,

    /// Behaviour of rows that fail part-way through.
    pub write_policy: WritePolicy,

    /// Reject rows whose column count differs from the first row's.
    pub strict_column_count: bool,
}

impl DecoderConfig {
    /// Creates a configuration with a list delimiter and null sentinel.
    pub fn new(list_delimiter: impl Into<String>, null_sentinel: impl Into<String>) -> Self {
        Self {
            list_delimiter: list_delimiter.into(),
            null_sentinel: null_sentinel.into(),
            ..Default::default()
        }
    }

    /// Set the list-of-text delimiter.
    #[must_use]
    pub fn with_list_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.list_delimiter = delimiter.into();
        self
    }

    /// Set the null sentinel.
    #[must_use]
    pub fn with_null_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.null_sentinel = sentinel.into();
        self
    }

    /// Set the text normalization form.
    #[must_use]
    pub fn with_normalization(mut self, form: NormalizationForm) -> Self {
        self.normalization = form;
        self
    }

    /// Set the tag collision policy.
    #[must_use]
    pub fn with_tag_policy(mut self, policy: TagPolicy) -> Self {
        self.tag_policy = policy;
        self
    }

    /// Set the partial-row write policy.
    #[must_use]
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    /// Enable or disable the column count check.
    #[must_use]
    pub fn with_strict_column_count(mut self, strict: bool) -> Self {
        self.strict_column_count = strict;
        self
    }

    /// Returns the list delimiter, or `None` when splitting is disabled.
    pub fn list_delimiter(&self) -> Option<&str> {
        Some(self.list_delimiter.as_str()).filter(|d| !d.is_empty())
    }

    /// Returns the null sentinel, or `None` when substitution is disabled.
    pub fn null_sentinel(&self) -> Option<&str> {
        Some(self.null_sentinel.as_str()).filter(|s| !s.is_empty())
    }
}
