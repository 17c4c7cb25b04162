//! Profile resolution and dispatch to the extractor or statement parser.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{InputError, Result};
use crate::extract::ProfileExtractor;
use crate::models::{DocfieldsConfig, DocumentOutput};
use crate::profile::{DocumentKind, DocumentProfile, ProfileRegistry};
use crate::statement::TransactionLineParser;

/// Checked entry point: validates input, picks a profile and runs the
/// matching engine.
#[derive(Debug, Clone)]
pub struct DocumentPipeline {
    registry: ProfileRegistry,
    config: DocfieldsConfig,
    extractor: ProfileExtractor,
    parser: TransactionLineParser,
}

impl DocumentPipeline {
    /// Pipeline over the built-in profiles with default configuration.
    pub fn new() -> Self {
        Self::with_registry(ProfileRegistry::builtin(), DocfieldsConfig::default())
    }

    pub fn with_registry(registry: ProfileRegistry, config: DocfieldsConfig) -> Self {
        Self {
            extractor: ProfileExtractor::new().with_fallback(config.extraction.enable_fallback),
            parser: TransactionLineParser::from_config(&config.statement),
            registry,
            config,
        }
    }

    /// Built-in profiles plus every definition file named in `config`.
    pub fn from_config(config: DocfieldsConfig) -> Result<Self> {
        let mut registry = ProfileRegistry::builtin();

        for path in &config.profiles.extra_files {
            let ids = registry.load_definitions_file(path)?;
            info!("Loaded profiles {:?} from {}", ids, path.display());
        }

        Ok(Self::with_registry(registry, config))
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    pub fn config(&self) -> &DocfieldsConfig {
        &self.config
    }

    /// Replace the statement parser, e.g. to plug in a custom classifier.
    pub fn with_parser(mut self, parser: TransactionLineParser) -> Self {
        self.parser = parser;
        self
    }

    /// Explicit id, else marker detection (when enabled), else the default.
    pub fn resolve_profile(&self, text: &str, profile_id: Option<&str>) -> Result<&DocumentProfile> {
        if let Some(id) = profile_id {
            return Ok(self.registry.get(id)?);
        }

        if self.config.extraction.detect_profile {
            if let Some(profile) = self.registry.detect(text) {
                debug!("Detected profile {}", profile.id());
                return Ok(profile);
            }
        }

        Ok(self.registry.get(&self.config.extraction.default_profile)?)
    }

    /// Validate `text`, resolve the profile and extract.
    pub fn process(&self, text: &str, profile_id: Option<&str>) -> Result<DocumentOutput> {
        self.process_at(text, profile_id, Utc::now())
    }

    pub fn process_at(
        &self,
        text: &str,
        profile_id: Option<&str>,
        timestamp: DateTime<Utc>,
    ) -> Result<DocumentOutput> {
        self.check_input(text)?;

        let profile = self.resolve_profile(text, profile_id)?;

        let output = match profile.kind() {
            DocumentKind::Fields => {
                DocumentOutput::Fields(self.extractor.extract_at(text, profile, timestamp))
            }
            DocumentKind::BankStatement => {
                DocumentOutput::Statement(self.parser.parse_statement(text, profile, timestamp))
            }
        };

        Ok(output)
    }

    fn check_input(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(InputError::EmptyText.into());
        }

        let limit = self.config.extraction.max_input_bytes;
        if text.len() > limit {
            return Err(InputError::TooLarge {
                length: text.len(),
                limit,
            }
            .into());
        }

        Ok(())
    }
}

impl Default for DocumentPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DocfieldsError, ProfileError};
    use crate::statement::ClassificationPolicy;
    use std::io::Write;

    const SHRIRAM: &str = "Policy No. 10047/31/26/002595\nSHRIRAM GENERAL INSURANCE COMPANY LIMITED\nPREMIUM AMOUNT 1507";
    const STATEMENT: &str = "STATEMENT OF ACCOUNT\n15/04/2024 NEFT TRANSFER CR 5,000.00 45,200.00\n";

    #[test]
    fn test_detects_institution_profile() {
        let pipeline = DocumentPipeline::new();
        let output = pipeline.process(SHRIRAM, None).unwrap();

        assert_eq!(output.profile(), "shriram");
        let fields = output.as_fields().unwrap();
        assert_eq!(fields.get("policy_number"), Some("10047/31/26/002595"));
        assert_eq!(fields.get("premium_amount"), Some("1507"));
    }

    #[test]
    fn test_explicit_profile_wins() {
        let pipeline = DocumentPipeline::new();
        let output = pipeline.process(SHRIRAM, Some("generic")).unwrap();
        assert_eq!(output.profile(), "generic");
    }

    #[test]
    fn test_default_profile_when_nothing_detected() {
        let pipeline = DocumentPipeline::new();
        let output = pipeline.process("Policy No. 12345", None).unwrap();
        assert_eq!(output.profile(), "generic");

        let mut config = DocfieldsConfig::default();
        config.extraction.detect_profile = false;
        let pipeline = DocumentPipeline::with_registry(ProfileRegistry::builtin(), config);
        assert_eq!(pipeline.process(SHRIRAM, None).unwrap().profile(), "generic");
    }

    #[test]
    fn test_statement_dispatch() {
        let output = DocumentPipeline::new().process(STATEMENT, None).unwrap();
        let statement = output.as_statement().unwrap();

        assert_eq!(statement.profile, "bank-statement");
        assert_eq!(statement.transactions.len(), 1);
        assert_eq!(statement.transactions[0].description, "NEFT TRANSFER");
    }

    #[test]
    fn test_statement_policy_from_config() {
        let mut config = DocfieldsConfig::default();
        config.statement.classification = ClassificationPolicy::SecondIsCredit;
        let pipeline = DocumentPipeline::with_registry(ProfileRegistry::builtin(), config);

        let output = pipeline
            .process("01/04/2024 TRANSFER 100.00 900.00", Some("bank-statement"))
            .unwrap();
        let statement = output.as_statement().unwrap();

        assert_eq!(statement.metadata.classification_policy, "second-is-credit");
        assert!(statement.transactions[0].credit.is_some());
    }

    #[test]
    fn test_rejects_blank_and_oversized_input() {
        let pipeline = DocumentPipeline::new();
        assert!(matches!(
            pipeline.process("  \n ", None),
            Err(DocfieldsError::Input(InputError::EmptyText))
        ));

        let mut config = DocfieldsConfig::default();
        config.extraction.max_input_bytes = 8;
        let pipeline = DocumentPipeline::with_registry(ProfileRegistry::builtin(), config);
        assert!(matches!(
            pipeline.process("Policy No. 12345", None),
            Err(DocfieldsError::Input(InputError::TooLarge { length: 16, limit: 8 }))
        ));
    }

    #[test]
    fn test_unknown_profile_is_an_error() {
        let result = DocumentPipeline::new().process(SHRIRAM, Some("nope"));
        assert!(matches!(
            result,
            Err(DocfieldsError::Profile(ProfileError::Unknown(id))) if id == "nope"
        ));
    }

    #[test]
    fn test_from_config_loads_extra_profiles() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "id": "acme",
                "markers": ["ACME MUTUAL"],
                "fields": [{{ "name": "member_id", "rules": [{{ "pattern": "Member\\s*ID\\s*:\\s*(\\w+)" }}] }}]
            }}"#
        )
        .unwrap();

        let mut config = DocfieldsConfig::default();
        config.profiles.extra_files.push(file.path().to_path_buf());
        let pipeline = DocumentPipeline::from_config(config).unwrap();

        let output = pipeline.process("ACME MUTUAL\nMember ID: A1234", None).unwrap();
        assert_eq!(output.profile(), "acme");
        assert_eq!(output.as_fields().unwrap().get("member_id"), Some("A1234"));
    }
}
