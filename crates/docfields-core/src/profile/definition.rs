//! Serializable profile definitions.
//!
//! Profiles loaded from JSON go through these types and are validated by
//! [`ProfileBuilder`](super::ProfileBuilder) on conversion.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{DocumentKind, DocumentProfile, ExtractionRule, FieldSpec, GroupSelection};
use crate::error::ProfileError;

/// JSON form of a [`DocumentProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDefinition {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub kind: DocumentKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
    /// Printed label to field name.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub aliases: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDefinition {
    pub pattern: String,
    #[serde(default)]
    pub selection: GroupSelection,
}

impl TryFrom<ProfileDefinition> for DocumentProfile {
    type Error = ProfileError;

    fn try_from(def: ProfileDefinition) -> Result<Self, Self::Error> {
        let mut builder = DocumentProfile::builder(def.id)
            .description(def.description)
            .kind(def.kind);

        for marker in def.markers {
            builder = builder.marker(marker);
        }

        for field in def.fields {
            let rules = field
                .rules
                .into_iter()
                .map(|r| ExtractionRule::with_selection(r.pattern, r.selection));
            builder = builder.field(FieldSpec::new(field.name).rules(rules));
        }

        for (label, field) in def.aliases {
            builder = builder.alias(label, field);
        }

        builder.build()
    }
}

impl From<&DocumentProfile> for ProfileDefinition {
    fn from(profile: &DocumentProfile) -> Self {
        Self {
            id: profile.id().to_string(),
            description: profile.description().to_string(),
            kind: profile.kind(),
            markers: profile.markers().to_vec(),
            fields: profile
                .fields()
                .iter()
                .map(|field| FieldDefinition {
                    name: field.name().to_string(),
                    rules: field
                        .extraction_rules()
                        .iter()
                        .map(|rule| RuleDefinition {
                            pattern: rule.pattern().to_string(),
                            selection: rule.selection(),
                        })
                        .collect(),
                })
                .collect(),
            aliases: profile
                .aliases()
                .iter()
                .map(|(label, field)| (label.to_string(), field.to_string()))
                .collect(),
        }
    }
}

impl DocumentProfile {
    /// Render the profile back into its serializable form.
    pub fn to_definition(&self) -> ProfileDefinition {
        ProfileDefinition::from(self)
    }
}
