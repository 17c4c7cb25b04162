//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::statement::ClassificationPolicy;

/// Main configuration for docfields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocfieldsConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Bank-statement parsing configuration.
    pub statement: StatementConfig,

    /// Additional profile definitions.
    pub profiles: ProfilesConfig,

    /// PDF text acquisition configuration.
    pub pdf: PdfConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Profile used when none is given and detection finds nothing.
    pub default_profile: String,

    /// Pick the profile from institution markers in the text.
    pub detect_profile: bool,

    /// Run the label/value fallback pass after the primary rules.
    pub enable_fallback: bool,

    /// Reject source text longer than this many bytes.
    pub max_input_bytes: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_profile: "generic".to_string(),
            detect_profile: true,
            enable_fallback: true,
            max_input_bytes: 16 * 1024 * 1024,
        }
    }
}

/// Bank-statement parsing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementConfig {
    /// How uncued amounts are split into debit, credit and balance.
    pub classification: ClassificationPolicy,

    /// Minimum description length for a line to count as a transaction.
    pub min_description_len: usize,

    /// Drop totals and opening/closing balance rows.
    pub skip_summary_rows: bool,
}

impl Default for StatementConfig {
    fn default() -> Self {
        Self {
            classification: ClassificationPolicy::default(),
            min_description_len: 3,
            skip_summary_rows: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilesConfig {
    /// JSON profile-definition files loaded at startup.
    pub extra_files: Vec<PathBuf>,
}

/// PDF text acquisition configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Prefix each page with a `=== PAGE n ===` line.
    pub page_markers: bool,

    /// Minimum text length to consider the PDF text-based.
    pub min_text_length: usize,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_markers: true,
            min_text_length: 20,
        }
    }
}

impl DocfieldsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DocfieldsConfig::default();

        assert_eq!(config.extraction.default_profile, "generic");
        assert!(config.extraction.enable_fallback);
        assert_eq!(config.extraction.max_input_bytes, 16 * 1024 * 1024);
        assert_eq!(config.statement.classification, ClassificationPolicy::SecondIsBalance);
        assert!(config.pdf.page_markers);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: DocfieldsConfig = serde_json::from_str(
            r#"{ "statement": { "classification": "second-is-credit" } }"#,
        )
        .unwrap();

        assert_eq!(config.statement.classification, ClassificationPolicy::SecondIsCredit);
        assert_eq!(config.statement.min_description_len, 3);
        assert!(config.extraction.detect_profile);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = DocfieldsConfig::default();
        config.extraction.default_profile = "reliance".to_string();
        config.profiles.extra_files.push(PathBuf::from("acme.json"));
        config.save(&path).unwrap();

        let loaded = DocfieldsConfig::from_file(&path).unwrap();
        assert_eq!(loaded.extraction.default_profile, "reliance");
        assert_eq!(loaded.profiles.extra_files, vec![PathBuf::from("acme.json")]);
    }
}
