//! Field extraction: primary rules, fallback scan and result formatting.

mod engine;
mod fallback;
mod format;

pub use engine::{FieldExtractor, FieldOutcome, FieldValues};
pub use fallback::{FallbackScanner, LabelToken};
pub use format::ResultFormatter;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::models::ExtractionResult;
use crate::profile::DocumentProfile;

/// Trait for field-map extractors.
pub trait DocumentExtractor {
    /// Extract every field the profile declares from `text`.
    fn extract(&self, text: &str, profile: &DocumentProfile) -> ExtractionResult;
}

/// Primary rules, then the fallback scanner, then result formatting.
#[derive(Debug, Clone)]
pub struct ProfileExtractor {
    fields: FieldExtractor,
    fallback: Option<FallbackScanner>,
    formatter: ResultFormatter,
}

impl ProfileExtractor {
    /// Create an extractor with the fallback pass enabled.
    pub fn new() -> Self {
        Self {
            fields: FieldExtractor::new(),
            fallback: Some(FallbackScanner::new()),
            formatter: ResultFormatter::new(),
        }
    }

    /// Enable or disable the fallback pass.
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback = enabled.then(FallbackScanner::new);
        self
    }

    /// Extract with an explicit timestamp.
    pub fn extract_at(
        &self,
        text: &str,
        profile: &DocumentProfile,
        timestamp: DateTime<Utc>,
    ) -> ExtractionResult {
        info!(
            "Extracting {} fields with profile {} from {} characters of text",
            profile.field_count(),
            profile.id(),
            text.len()
        );

        let mut values = self.fields.apply(text, profile);
        let primary = values.filled_count();

        if let Some(fallback) = &self.fallback {
            let filled = fallback.fill(text, profile, &mut values);
            debug!("Fallback filled {} of {} empty fields", filled, values.len() - primary);
        }

        self.formatter.fields(profile, text, values, timestamp)
    }
}

impl Default for ProfileExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentExtractor for ProfileExtractor {
    fn extract(&self, text: &str, profile: &DocumentProfile) -> ExtractionResult {
        self.extract_at(text, profile, Utc::now())
    }
}

/// Extract `profile`'s fields from `text` with the default extractor.
pub fn extract(text: &str, profile: &DocumentProfile) -> ExtractionResult {
    ProfileExtractor::new().extract(text, profile)
}

/// Collapse whitespace runs to one space and trim both ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldSource;
    use crate::profile::{ExtractionRule, FieldSpec, ProfileRegistry, INSURANCE_FIELDS};
    use pretty_assertions::assert_eq;

    const SHRIRAM: &str = "
    Policy No. 10047/31/26/002595
    IN-23512287 / MR. ARPIT SRIVASTAVA
    Insured Address and Contact Details DFDS FSDF , MUMBAI, MAHARASHTRA - 400001
    MH - 01 - SW - 3422 & MUMBAI CENTRAL
    6655774488 & 99554411225544778
    HONDA - ACTIVA 5G STD BS4
    SCOOTY / PETROL
    110 / 0 / 2019
    27/08/2019
    SHRIRAM GENERAL INSURANCE COMPANY LIMITED
    PREMIUM AMOUNT 1507
    ";

    const RELIANCE: &str = "
    Policy Number: 110322523470171735
    Insured Name: Mr. BIJALE ANTESHWAR VIJAY
    Communication Address & Place of Supply: GAT NO.322/2 FLAT NO.H-701, GANGA VATIKA LONIKAND, PUNE, PUNE, MAHARASHTRA, 412216
    Registration No.: MH12KE1128
    Make / Model: RENAULT / DUSTER / PETROL RXE
    Engine No. / Chassis No.: D244587 / MEEHSRC85D7000947
    Mfg. Month & Year: JUL-2013
    CC / HP / Watt: 1598
    Total Premium (₹): 9318
    RELIANCE GENERAL INSURANCE
    ";

    fn registry() -> ProfileRegistry {
        ProfileRegistry::builtin()
    }

    #[test]
    fn test_generic_profile_on_shriram_schedule() {
        let registry = registry();
        let result = extract(SHRIRAM, registry.get("generic").unwrap());

        assert_eq!(result.get("policy_number"), Some("10047/31/26/002595"));
        assert_eq!(result.get("policy_holder_name"), Some("MR. ARPIT SRIVASTAVA"));
        assert_eq!(
            result.get("insured_address"),
            Some("DFDS FSDF , MUMBAI, MAHARASHTRA - 400001")
        );
        assert_eq!(result.get("vehicle_registration_number"), Some("MH - 01 - SW - 3422"));
        assert_eq!(result.get("engine_number"), Some("6655774488"));
        assert_eq!(result.get("chassis_number"), Some("99554411225544778"));
        assert_eq!(result.get("make_model"), Some("HONDA - ACTIVA 5G STD BS4"));
        assert_eq!(result.get("fuel_type"), Some("PETROL"));
        assert_eq!(result.get("cubic_capacity"), Some("110"));
        assert_eq!(result.get("year_of_manufacture"), Some("2019"));
        assert_eq!(result.get("date_of_registration"), Some("27/08/2019"));
        assert_eq!(
            result.get("insurance_company"),
            Some("SHRIRAM GENERAL INSURANCE COMPANY LIMITED")
        );
        assert_eq!(result.get("premium_amount"), Some("1507"));
        assert_eq!(result.get("nominee_name"), Some(""));
        assert_eq!(result.metadata.filled_field_count, 13);
        assert_eq!(result.metadata.total_field_count, 20);
    }

    #[test]
    fn test_generic_profile_on_reliance_schedule() {
        let registry = registry();
        let result = extract(RELIANCE, registry.get("generic").unwrap());

        assert_eq!(result.get("policy_number"), Some("110322523470171735"));
        assert_eq!(result.get("policy_holder_name"), Some("Mr. BIJALE ANTESHWAR VIJAY"));
        assert_eq!(
            result.get("insured_address"),
            Some("GAT NO.322/2 FLAT NO.H-701, GANGA VATIKA LONIKAND, PUNE, PUNE, MAHARASHTRA, 412216")
        );
        assert_eq!(result.get("vehicle_registration_number"), Some("MH12KE1128"));
        assert_eq!(result.get("engine_number"), Some("D244587"));
        assert_eq!(result.get("chassis_number"), Some("MEEHSRC85D7000947"));
        assert_eq!(result.get("make_model"), Some("RENAULT / DUSTER / PETROL RXE"));
        assert_eq!(result.get("fuel_type"), Some("PETROL"));
        assert_eq!(result.get("cubic_capacity"), Some("1598"));
        assert_eq!(result.get("year_of_manufacture"), Some("2013"));
        assert_eq!(result.get("insurance_company"), Some("RELIANCE GENERAL INSURANCE"));
        assert_eq!(result.get("premium_amount"), Some("9318"));
        assert_eq!(result.get("date_of_registration"), Some(""));
        assert_eq!(result.metadata.filled_field_count, 12);
    }

    #[test]
    fn test_institution_profiles_match_generic_on_their_documents() {
        let registry = registry();
        let generic = registry.get("generic").unwrap();

        for (id, text) in [("shriram", SHRIRAM), ("reliance", RELIANCE)] {
            let specific = extract(text, registry.get(id).unwrap());
            let broad = extract(text, generic);
            assert_eq!(specific.fields, broad.fields, "profile {}", id);
        }
    }

    #[test]
    fn test_key_set_is_always_the_declared_set() {
        let registry = registry();
        let generic = registry.get("generic").unwrap();

        for text in [SHRIRAM, RELIANCE, "", "random words only"] {
            let result = extract(text, generic);
            let keys: Vec<&str> = result.fields.keys().map(String::as_str).collect();
            assert_eq!(keys, INSURANCE_FIELDS.to_vec());
        }
    }

    #[test]
    fn test_no_match_reports_zero_filled() {
        let registry = registry();
        let result = extract("lorem ipsum dolor sit amet", registry.get("generic").unwrap());

        assert_eq!(result.metadata.filled_field_count, 0);
        assert_eq!(result.metadata.total_field_count, 20);
        assert!(result.fields.values().all(String::is_empty));
        assert!(result.sources.values().all(|s| *s == FieldSource::Unmatched));
    }

    #[test]
    fn test_invalid_rule_does_not_abort_extraction() {
        let profile = DocumentProfile::builder("partly-broken")
            .field(FieldSpec::new("policy_number").rule(ExtractionRule::new(r"Policy\s*No\.?\s*([0-9/]+)")))
            .field(FieldSpec::new("engine_number").rule(ExtractionRule::new(r"Engine(?P<")))
            .field(FieldSpec::new("premium_amount").rule(ExtractionRule::new(r"PREMIUM\s*AMOUNT\s*(\d+)")))
            .build()
            .unwrap();

        let result = extract(SHRIRAM, &profile);

        assert_eq!(result.get("engine_number"), Some(""));
        assert_eq!(result.get("policy_number"), Some("10047/31/26/002595"));
        assert_eq!(result.get("premium_amount"), Some("1507"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].starts_with("engine_number"));
    }

    #[test]
    fn test_values_are_whitespace_normalised() {
        let registry = registry();
        for text in [SHRIRAM, RELIANCE] {
            let result = extract(text, registry.get("generic").unwrap());
            for value in result.fields.values() {
                assert_eq!(value.trim(), value);
                assert!(!value.contains("  "));
                assert!(!value.contains('\n'));
            }
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let registry = registry();
        let profile = registry.get("generic").unwrap();
        let at = Utc::now();
        let extractor = ProfileExtractor::new();

        assert_eq!(
            extractor.extract_at(RELIANCE, profile, at),
            extractor.extract_at(RELIANCE, profile, at)
        );
    }

    #[test]
    fn test_fallback_fills_unseen_layout() {
        let registry = registry();
        let text = "ACME MOTOR POLICY\nInsurer: Acme General Insurance\nNominee: RAHUL SHARMA   Nominee Age: 34\nRelationship: Brother";

        let with = ProfileExtractor::new().extract(text, registry.get("generic").unwrap());
        assert_eq!(with.get("insurance_company"), Some("Acme General Insurance"));
        assert_eq!(with.get("nominee_name"), Some("RAHUL SHARMA"));
        assert_eq!(with.get("nominee_age"), Some("34"));
        assert_eq!(with.get("nominee_relationship"), Some("Brother"));

        let without = ProfileExtractor::new()
            .with_fallback(false)
            .extract(text, registry.get("generic").unwrap());
        assert_eq!(without.get("insurance_company"), Some(""));
        assert_eq!(without.get("nominee_name"), Some(""));
    }

    #[test]
    fn test_blank_primary_match_left_to_fallback() {
        let profile = DocumentProfile::builder("nominee")
            .field(
                FieldSpec::new("nominee_name")
                    .rule(ExtractionRule::new(r"Nominee\s*Name\s*:([ \t]*)$"))
                    .rule(ExtractionRule::new(r"Nominee\s*:\s*(\w+)")),
            )
            .aliases("nominee_name", ["Appointee"])
            .build()
            .unwrap();
        let text = "Nominee Name:   \nNominee: SUNITA\nAppointee: RAVI KUMAR";

        let result = extract(text, &profile);
        assert_eq!(result.get("nominee_name"), Some("RAVI KUMAR"));
        assert_eq!(
            result.sources["nominee_name"],
            FieldSource::Fallback { label: "Appointee".to_string() }
        );

        let primary_only = ProfileExtractor::new().with_fallback(false).extract(text, &profile);
        assert_eq!(primary_only.get("nominee_name"), Some(""));
        assert_eq!(primary_only.sources["nominee_name"], FieldSource::RuleBlank { index: 0 });
        assert_eq!(primary_only.metadata.filled_field_count, 0);
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  a \t b\n\nc  "), "a b c");
        assert_eq!(normalize_whitespace(" \n "), "");
    }
}
