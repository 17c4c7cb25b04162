//! Label alias table used by the fallback scanner.

use std::collections::HashMap;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};

use crate::error::ProfileError;

/// Maps printed label text onto field names.
///
/// Labels are compared on their lower-cased alphanumeric content, so
/// "Make / Model", "Make/Model" and "MAKE MODEL" are the same label.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: IndexMap<String, String>,
    keys: HashMap<String, String>,
    matcher: Option<Regex>,
}

impl AliasTable {
    /// Build an alias table from `(label, field)` pairs.
    pub fn new<I, L, F>(entries: I) -> Result<Self, ProfileError>
    where
        I: IntoIterator<Item = (L, F)>,
        L: Into<String>,
        F: Into<String>,
    {
        let mut table = Self::default();

        for (label, field) in entries {
            let label = label.into();
            let field = field.into();

            let key = alias_key(&label);
            if key.is_empty() {
                return Err(ProfileError::EmptyAlias { alias: label });
            }

            match table.keys.get(&key) {
                Some(existing) if *existing != field => {
                    return Err(ProfileError::ConflictingAlias {
                        alias: label,
                        first: existing.clone(),
                        second: field,
                    });
                }
                Some(_) => {}
                None => {
                    table.keys.insert(key, field.clone());
                }
            }

            table.entries.insert(label, field);
        }

        table.matcher = table.build_matcher()?;
        Ok(table)
    }

    /// Field name for a printed label, if the label is known.
    pub fn field_for(&self, label: &str) -> Option<&str> {
        self.keys.get(&alias_key(label)).map(String::as_str)
    }

    /// Declared `(label, field)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, f)| (l.as_str(), f.as_str()))
    }

    /// Number of declared labels, including spellings of the same label.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Regex matching any known label followed by a `:` separator.
    ///
    /// The label text is exposed as the `label` capture group.
    pub fn matcher(&self) -> Option<&Regex> {
        self.matcher.as_ref()
    }

    fn build_matcher(&self) -> Result<Option<Regex>, ProfileError> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        let mut labels: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        // Longest first so that "Total Premium (₹)" wins over "Total Premium".
        labels.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        let alternation = labels
            .iter()
            .map(|label| label_pattern(label))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = format!(r"(?P<label>{})[ \t]*:", alternation);
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

        Ok(Some(regex))
    }
}

/// Normalised lookup key for a label.
pub(crate) fn alias_key(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn label_pattern(label: &str) -> String {
    let body = label
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[ \t]*");

    match label.chars().next() {
        Some(c) if c.is_alphanumeric() => format!(r"\b{}", body),
        _ => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_key_normalisation() {
        assert_eq!(alias_key("Make / Model"), "makemodel");
        assert_eq!(alias_key("MAKE/MODEL"), "makemodel");
        assert_eq!(alias_key("Total Premium (₹)"), "totalpremium");
        assert_eq!(alias_key("Mfg. Month & Year"), "mfgmonthyear");
    }

    #[test]
    fn test_field_lookup() {
        let table = AliasTable::new([
            ("Policy Number", "policy_number"),
            ("Insured Name", "policy_holder_name"),
        ])
        .unwrap();

        assert_eq!(table.field_for("POLICY  NUMBER"), Some("policy_number"));
        assert_eq!(table.field_for("Insured Name"), Some("policy_holder_name"));
        assert_eq!(table.field_for("Mobile"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_conflicting_alias() {
        let result = AliasTable::new([
            ("Make / Model", "make_model"),
            ("Make Model", "fuel_type"),
        ]);

        assert!(matches!(result, Err(ProfileError::ConflictingAlias { .. })));
    }

    #[test]
    fn test_spellings_of_same_label_share_a_target() {
        let table = AliasTable::new([
            ("Total Premium", "premium_amount"),
            ("Total Premium (₹)", "premium_amount"),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        let caps = table.matcher().unwrap().captures("Total Premium (₹): 9318").unwrap();
        assert_eq!(&caps["label"], "Total Premium (₹)");
        assert_eq!(table.field_for(&caps["label"]), Some("premium_amount"));
    }

    #[test]
    fn test_empty_alias() {
        let result = AliasTable::new([("(₹)", "premium_amount")]);
        assert!(matches!(result, Err(ProfileError::EmptyAlias { .. })));
    }

    #[test]
    fn test_matcher_prefers_longest_label() {
        let table = AliasTable::new([
            ("Insurer", "insurance_company"),
            ("Previous Insurer", "previous_insurer"),
        ])
        .unwrap();

        let caps = table.matcher().unwrap().captures("Previous Insurer: ACME").unwrap();
        assert_eq!(&caps["label"], "Previous Insurer");
    }

    #[test]
    fn test_empty_table_has_no_matcher() {
        let table = AliasTable::new(Vec::<(String, String)>::new()).unwrap();
        assert!(table.matcher().is_none());
        assert!(table.is_empty());
    }
}
