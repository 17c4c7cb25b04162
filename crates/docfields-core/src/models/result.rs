//! Field-map extraction results.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::transaction::StatementResult;

/// Where a field value came from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldSource {
    /// No rule matched and the fallback found nothing.
    #[default]
    Unmatched,
    /// Primary rule at `index` in the field's rule list.
    Rule { index: usize },
    /// Rule at `index` matched but selected only blank text; the field was
    /// left empty and later rules were not tried.
    RuleBlank { index: usize },
    /// Fallback scanner, via the printed `label`.
    Fallback { label: String },
    /// Rule at `index` failed to evaluate; the field was left empty.
    RuleFailed { index: usize, reason: String },
}

impl FieldSource {
    /// Whether this source carries a value.
    pub fn is_filled(&self) -> bool {
        matches!(self, Self::Rule { .. } | Self::Fallback { .. })
    }
}

/// Completeness metadata attached to every field-map result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    pub filled_field_count: usize,
    pub total_field_count: usize,
    /// Length of the source text in characters.
    pub source_text_length: usize,
    pub timestamp: DateTime<Utc>,
}

/// Complete field-name to value map for one document.
///
/// Every field the profile declares is present; unmatched fields hold an
/// empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Id of the profile that produced the result.
    pub profile: String,
    pub fields: IndexMap<String, String>,
    #[serde(default)]
    pub sources: IndexMap<String, FieldSource>,
    pub metadata: ExtractionMetadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl ExtractionResult {
    /// Value of a field; `None` only for undeclared fields.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Names of fields that hold a value.
    pub fn filled_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, v)| !v.is_empty())
            .map(|(k, _)| k.as_str())
    }

    /// Names of fields left empty.
    pub fn missing_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(k, _)| k.as_str())
    }

    /// Filled share of declared fields, 0.0 to 1.0.
    pub fn completeness(&self) -> f64 {
        if self.metadata.total_field_count == 0 {
            return 0.0;
        }
        self.metadata.filled_field_count as f64 / self.metadata.total_field_count as f64
    }

    pub fn is_complete(&self) -> bool {
        self.metadata.filled_field_count == self.metadata.total_field_count
    }
}

/// Output of one processed document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentOutput {
    Fields(ExtractionResult),
    Statement(StatementResult),
}

impl DocumentOutput {
    /// Id of the profile that produced the output.
    pub fn profile(&self) -> &str {
        match self {
            Self::Fields(result) => &result.profile,
            Self::Statement(result) => &result.profile,
        }
    }

    pub fn as_fields(&self) -> Option<&ExtractionResult> {
        match self {
            Self::Fields(result) => Some(result),
            Self::Statement(_) => None,
        }
    }

    pub fn as_statement(&self) -> Option<&StatementResult> {
        match self {
            Self::Statement(result) => Some(result),
            Self::Fields(_) => None,
        }
    }
}
