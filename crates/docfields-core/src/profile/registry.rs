//! Registry of document profiles keyed by id.

use std::path::Path;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use tracing::{debug, warn};

use super::builtin::builtin_profiles;
use super::{DocumentProfile, ProfileDefinition};
use crate::error::{DocfieldsError, ProfileError, Result};

lazy_static! {
    static ref BUILTIN: ProfileRegistry = {
        let mut registry = ProfileRegistry::new();
        for profile in builtin_profiles().unwrap() {
            registry.register(profile).unwrap();
        }
        registry
    };
}

/// Named profiles in registration order.
///
/// Populated at startup and read-only afterwards; every lookup hands out a
/// shared reference.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: IndexMap<String, DocumentProfile>,
}

impl ProfileRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the built-in profiles.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Add a profile. Ids are unique.
    pub fn register(&mut self, profile: DocumentProfile) -> std::result::Result<(), ProfileError> {
        if self.profiles.contains_key(profile.id()) {
            return Err(ProfileError::Duplicate(profile.id().to_string()));
        }

        for field in profile.fields() {
            for rule in field.extraction_rules().iter().filter(|r| !r.is_valid()) {
                warn!(
                    "Profile {} field {} has a rule that does not compile: {}",
                    profile.id(),
                    field.name(),
                    rule.pattern()
                );
            }
        }

        debug!("Registered profile {} ({} fields)", profile.id(), profile.field_count());
        self.profiles.insert(profile.id().to_string(), profile);
        Ok(())
    }

    /// Look up a profile by id.
    pub fn get(&self, id: &str) -> std::result::Result<&DocumentProfile, ProfileError> {
        self.profiles
            .get(id)
            .ok_or_else(|| ProfileError::Unknown(id.to_string()))
    }

    /// First profile, in registration order, with a marker present in `text`.
    pub fn detect(&self, text: &str) -> Option<&DocumentProfile> {
        let lowered = text.to_lowercase();
        self.profiles.values().find(|p| p.matches_marker(&lowered))
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Register profiles from a JSON string holding one definition or an
    /// array of definitions. Returns the ids added.
    pub fn load_definitions_str(&mut self, json: &str) -> Result<Vec<String>> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let definitions: Vec<ProfileDefinition> = if value.is_array() {
            serde_json::from_value(value)?
        } else {
            vec![serde_json::from_value(value)?]
        };

        let mut ids = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let profile = DocumentProfile::try_from(definition)?;
            ids.push(profile.id().to_string());
            self.register(profile)?;
        }

        Ok(ids)
    }

    /// Register profiles from a JSON definition file.
    pub fn load_definitions_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<String>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        self.load_definitions_str(&content).map_err(|e| match e {
            DocfieldsError::Json(err) => {
                DocfieldsError::Config(format!("{}: {}", path.display(), err))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_registry() {
        let registry = ProfileRegistry::builtin();

        assert_eq!(registry.len(), 4);
        assert!(registry.get("generic").is_ok());
        assert!(registry.get("bank-statement").is_ok());
        assert!(matches!(
            registry.get("nope"),
            Err(ProfileError::Unknown(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_detect_by_marker() {
        let registry = ProfileRegistry::builtin();

        let text = "Policy Number: 1\nReliance General Insurance Company Limited";
        assert_eq!(registry.detect(text).map(|p| p.id()), Some("reliance"));

        let text = "HDFC BANK\nStatement of Account\n01/04/2024 ATM WDL 500.00";
        assert_eq!(registry.detect(text).map(|p| p.id()), Some("bank-statement"));

        assert!(registry.detect("nothing recognisable").is_none());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = ProfileRegistry::builtin();
        let again = registry.get("generic").unwrap().clone();

        assert!(matches!(
            registry.register(again),
            Err(ProfileError::Duplicate(_))
        ));
    }

    #[test]
    fn test_load_definition_array() {
        let mut registry = ProfileRegistry::new();
        let ids = registry
            .load_definitions_str(
                r#"[
                    { "id": "a", "fields": [{ "name": "x", "rules": [{ "pattern": "x" }] }] },
                    { "id": "b", "kind": "bank_statement", "markers": ["B BANK"] }
                ]"#,
            )
            .unwrap();

        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_load_definition_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "id": "acme", "markers": ["ACME"], "fields": [{{ "name": "policy_number", "rules": [{{ "pattern": "Ref\\s*(\\d+)" }}] }}] }}"#
        )
        .unwrap();

        let mut registry = ProfileRegistry::builtin();
        let ids = registry.load_definitions_file(file.path()).unwrap();

        assert_eq!(ids, vec!["acme"]);
        assert_eq!(registry.detect("acme ref 42").map(|p| p.id()), Some("acme"));
    }

    #[test]
    fn test_malformed_definition_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let mut registry = ProfileRegistry::new();
        assert!(matches!(
            registry.load_definitions_file(file.path()),
            Err(DocfieldsError::Config(_))
        ));
    }
}
