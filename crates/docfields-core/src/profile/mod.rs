//! Document profiles: per-institution field rules as plain data.
//!
//! A [`DocumentProfile`] is an ordered list of [`FieldSpec`]s plus an optional
//! [`AliasTable`] for the fallback scanner. Supporting a new layout means
//! building a new profile (in code via [`ProfileBuilder`] or from a JSON
//! [`ProfileDefinition`]); the extractor itself never changes.

mod alias;
mod builtin;
mod definition;
mod registry;
mod rule;
pub mod rules;

pub use alias::AliasTable;
pub use builtin::{builtin_profiles, INSURANCE_FIELDS};
pub use definition::{FieldDefinition, ProfileDefinition, RuleDefinition};
pub use registry::ProfileRegistry;
pub use rule::{ExtractionRule, GroupSelection};

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// What a profile produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Flat field-name to value map.
    #[default]
    Fields,
    /// Sequence of bank-statement transactions.
    BankStatement,
}

/// A named field with its rules in priority order.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    rules: Vec<ExtractionRule>,
}

impl FieldSpec {
    /// Create a field without rules.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule; earlier rules take priority.
    pub fn rule(mut self, rule: ExtractionRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Append several rules in order.
    pub fn rules(mut self, rules: impl IntoIterator<Item = ExtractionRule>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in priority order.
    pub fn extraction_rules(&self) -> &[ExtractionRule] {
        &self.rules
    }
}

/// Full rule set for one institution or document layout.
#[derive(Debug, Clone)]
pub struct DocumentProfile {
    id: String,
    description: String,
    kind: DocumentKind,
    markers: Vec<String>,
    lowered_markers: Vec<String>,
    fields: Vec<FieldSpec>,
    aliases: AliasTable,
}

impl DocumentProfile {
    /// Start building a profile.
    pub fn builder(id: impl Into<String>) -> ProfileBuilder {
        ProfileBuilder::new(id)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Literal text that identifies documents of this layout.
    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Field specs in declaration order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Declared field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(FieldSpec::name)
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Whether the profile declares `field`.
    pub fn declares(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.name == field)
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Whether any marker occurs in `lowered_text` (already lower-cased).
    pub(crate) fn matches_marker(&self, lowered_text: &str) -> bool {
        self.lowered_markers
            .iter()
            .any(|marker| lowered_text.contains(marker.as_str()))
    }
}

/// Builder for [`DocumentProfile`] that validates the structure on `build`.
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    id: String,
    description: String,
    kind: DocumentKind,
    markers: Vec<String>,
    fields: Vec<FieldSpec>,
    aliases: Vec<(String, String)>,
}

impl ProfileBuilder {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            kind: DocumentKind::Fields,
            markers: Vec::new(),
            fields: Vec::new(),
            aliases: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn kind(mut self, kind: DocumentKind) -> Self {
        self.kind = kind;
        self
    }

    /// Add a literal that identifies this layout in document text.
    pub fn marker(mut self, marker: impl Into<String>) -> Self {
        self.markers.push(marker.into());
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Map a printed label onto a declared field for the fallback pass.
    pub fn alias(mut self, label: impl Into<String>, field: impl Into<String>) -> Self {
        self.aliases.push((label.into(), field.into()));
        self
    }

    /// Map several labels onto the same field.
    pub fn aliases<I, L>(mut self, field: &str, labels: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        self.aliases
            .extend(labels.into_iter().map(|l| (l.into(), field.to_string())));
        self
    }

    /// Validate and build the profile.
    pub fn build(self) -> Result<DocumentProfile, ProfileError> {
        let id = self.id.trim().to_string();
        if id.is_empty() {
            return Err(ProfileError::EmptyId);
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.trim().is_empty() {
                return Err(ProfileError::EmptyFieldName { profile: id });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(ProfileError::DuplicateField {
                    profile: id,
                    field: field.name.clone(),
                });
            }
        }

        if self.kind == DocumentKind::Fields && self.fields.is_empty() {
            return Err(ProfileError::NoFields { profile: id });
        }

        if let Some((alias, field)) = self
            .aliases
            .iter()
            .find(|(_, field)| !seen.contains(field.as_str()))
        {
            return Err(ProfileError::UnknownAliasTarget {
                profile: id,
                alias: alias.clone(),
                field: field.clone(),
            });
        }

        let aliases = AliasTable::new(self.aliases)?;
        let lowered_markers = self
            .markers
            .iter()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();

        Ok(DocumentProfile {
            id,
            description: self.description,
            kind: self.kind,
            markers: self.markers,
            lowered_markers,
            fields: self.fields,
            aliases,
        })
    }
}
