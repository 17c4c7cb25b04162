//! Primary rule pass.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::models::FieldSource;
use crate::profile::{DocumentProfile, FieldSpec};

/// Value and provenance of one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldOutcome {
    pub value: String,
    pub source: FieldSource,
}

/// Working field map shared by the extraction passes.
///
/// Holds exactly the profile's declared fields; values are only ever written
/// into empty slots.
#[derive(Debug, Clone, Default)]
pub struct FieldValues {
    outcomes: IndexMap<String, FieldOutcome>,
    warnings: Vec<String>,
}

impl FieldValues {
    /// Empty slot for every field the profile declares.
    pub fn for_profile(profile: &DocumentProfile) -> Self {
        Self {
            outcomes: profile
                .field_names()
                .map(|name| (name.to_string(), FieldOutcome::default()))
                .collect(),
            warnings: Vec::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.outcomes.get(field).map(|o| o.value.as_str())
    }

    pub fn outcome(&self, field: &str) -> Option<&FieldOutcome> {
        self.outcomes.get(field)
    }

    /// Whether a declared field still has no value.
    pub fn is_empty_field(&self, field: &str) -> bool {
        self.outcomes.get(field).is_some_and(|o| o.value.is_empty())
    }

    /// Store `value` if `field` is declared and still empty.
    pub fn fill(&mut self, field: &str, value: String, source: FieldSource) -> bool {
        match self.outcomes.get_mut(field) {
            Some(outcome) if outcome.value.is_empty() && !value.is_empty() => {
                outcome.value = value;
                outcome.source = source;
                true
            }
            _ => false,
        }
    }

    fn set(&mut self, field: &str, outcome: FieldOutcome) {
        if let Some(slot) = self.outcomes.get_mut(field) {
            *slot = outcome;
        }
    }

    pub fn warn(&mut self, message: String) {
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn filled_count(&self) -> usize {
        self.outcomes.values().filter(|o| !o.value.is_empty()).count()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldOutcome)> {
        self.outcomes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn into_parts(self) -> (IndexMap<String, FieldOutcome>, Vec<String>) {
        (self.outcomes, self.warnings)
    }
}

/// Applies a profile's field rules to text.
///
/// For each field the rules run in declared order and the first one whose
/// pattern matches wins, even when the text it selects is blank. A rule that
/// fails to evaluate leaves its field empty and stops that field; the other
/// fields are unaffected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run the primary pass over every declared field.
    pub fn apply(&self, text: &str, profile: &DocumentProfile) -> FieldValues {
        let mut values = FieldValues::for_profile(profile);

        for field in profile.fields() {
            let outcome = self.evaluate_field(field, text);

            match &outcome.source {
                FieldSource::Rule { index } => {
                    debug!("{}: rule {} -> {:?}", field.name(), index, outcome.value);
                }
                FieldSource::RuleBlank { index } => {
                    debug!("{}: rule {} matched a blank value", field.name(), index);
                }
                FieldSource::RuleFailed { index, reason } => {
                    warn!("{}: rule {} failed: {}", field.name(), index, reason);
                    values.warn(format!("{}: rule {} failed: {}", field.name(), index, reason));
                }
                _ => debug!("{}: no rule matched", field.name()),
            }

            values.set(field.name(), outcome);
        }

        values
    }

    fn evaluate_field(&self, field: &FieldSpec, text: &str) -> FieldOutcome {
        for (index, rule) in field.extraction_rules().iter().enumerate() {
            match rule.evaluate(text) {
                Ok(Some(value)) if value.is_empty() => {
                    return FieldOutcome {
                        value,
                        source: FieldSource::RuleBlank { index },
                    };
                }
                Ok(Some(value)) => {
                    return FieldOutcome {
                        value,
                        source: FieldSource::Rule { index },
                    };
                }
                Ok(None) => continue,
                Err(e) => {
                    return FieldOutcome {
                        value: String::new(),
                        source: FieldSource::RuleFailed {
                            index,
                            reason: e.to_string(),
                        },
                    };
                }
            }
        }

        FieldOutcome::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ExtractionRule;

    fn profile() -> DocumentProfile {
        DocumentProfile::builder("test")
            .field(
                FieldSpec::new("policy_number")
                    .rule(ExtractionRule::new(r"Policy\s*No\.?\s*([0-9/]+)"))
                    .rule(ExtractionRule::new(r"Policy\s*Number\s*:\s*([0-9]+)")),
            )
            .field(FieldSpec::new("broken").rule(ExtractionRule::new(r"([A-Z")))
            .field(
                FieldSpec::new("premium_amount")
                    .rule(ExtractionRule::new(r"Premium\s*:\s*(\d+)")),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_earlier_rule_wins() {
        let text = "Policy Number: 999\nPolicy No. 10047/31";
        let values = FieldExtractor::new().apply(text, &profile());

        assert_eq!(values.get("policy_number"), Some("10047/31"));
        assert_eq!(
            values.outcome("policy_number").unwrap().source,
            FieldSource::Rule { index: 0 }
        );
    }

    #[test]
    fn test_later_rule_used_when_earlier_misses() {
        let values = FieldExtractor::new().apply("Policy Number: 999", &profile());

        assert_eq!(values.get("policy_number"), Some("999"));
        assert_eq!(
            values.outcome("policy_number").unwrap().source,
            FieldSource::Rule { index: 1 }
        );
    }

    #[test]
    fn test_blank_match_stops_later_rules() {
        let profile = DocumentProfile::builder("nominee")
            .field(
                FieldSpec::new("nominee_name")
                    .rule(ExtractionRule::new(r"Nominee\s*Name\s*:([ \t]*)$"))
                    .rule(ExtractionRule::new(r"Appointee\s*:\s*(\w+)")),
            )
            .build()
            .unwrap();

        let values = FieldExtractor::new().apply("Nominee Name:   \nAppointee: RAVI", &profile);

        assert_eq!(values.get("nominee_name"), Some(""));
        assert_eq!(
            values.outcome("nominee_name").unwrap().source,
            FieldSource::RuleBlank { index: 0 }
        );
        assert!(values.is_empty_field("nominee_name"));
        assert_eq!(values.filled_count(), 0);

        let values = FieldExtractor::new().apply("Appointee: RAVI", &profile);
        assert_eq!(values.get("nominee_name"), Some("RAVI"));
    }

    #[test]
    fn test_rule_failure_is_contained() {
        let values = FieldExtractor::new().apply("Policy No 1\nPremium: 1507", &profile());

        assert_eq!(values.get("broken"), Some(""));
        assert!(matches!(
            values.outcome("broken").unwrap().source,
            FieldSource::RuleFailed { index: 0, .. }
        ));
        assert_eq!(values.get("policy_number"), Some("1"));
        assert_eq!(values.get("premium_amount"), Some("1507"));
        assert_eq!(values.warnings().len(), 1);
    }

    #[test]
    fn test_every_declared_field_present() {
        let values = FieldExtractor::new().apply("nothing here", &profile());

        assert_eq!(values.len(), 3);
        assert_eq!(values.filled_count(), 0);
        assert!(values.iter().all(|(_, o)| o.value.is_empty()));
    }

    #[test]
    fn test_fill_never_overwrites() {
        let mut values = FieldExtractor::new().apply("Policy No 1", &profile());

        assert!(!values.fill(
            "policy_number",
            "2".to_string(),
            FieldSource::Fallback { label: "Policy".into() }
        ));
        assert!(values.fill(
            "premium_amount",
            "10".to_string(),
            FieldSource::Fallback { label: "Premium".into() }
        ));
        assert!(!values.fill("undeclared", "x".to_string(), FieldSource::Unmatched));
        assert_eq!(values.get("policy_number"), Some("1"));
    }
}
