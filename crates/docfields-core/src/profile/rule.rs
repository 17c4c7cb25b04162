//! Extraction rules: one pattern plus a capture-group selection policy.

use regex::{Captures, Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::RuleError;
use crate::extract::normalize_whitespace;

/// Upper bound on the compiled size of a single rule pattern.
const RULE_SIZE_LIMIT: usize = 1 << 20;

/// How a rule turns a regex match into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSelection {
    /// First capture group (by index) with non-blank text. When no capture
    /// group took part in the match, the whole match is the value. When groups
    /// took part but all of them are blank, the value is blank.
    #[default]
    FirstNonEmpty,
    /// First capture group with non-blank text, never the whole match.
    GroupsOnly,
    /// Always the whole match.
    WholeMatch,
}

impl GroupSelection {
    fn select<'t>(&self, caps: &Captures<'t>) -> Option<&'t str> {
        let first_group = || {
            caps.iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str())
                .find(|s| !s.trim().is_empty())
        };

        match self {
            Self::FirstNonEmpty => {
                let participated = caps.iter().skip(1).any(|m| m.is_some());
                if participated {
                    first_group()
                } else {
                    caps.get(0).map(|m| m.as_str())
                }
            }
            Self::GroupsOnly => first_group(),
            Self::WholeMatch => caps.get(0).map(|m| m.as_str()),
        }
    }
}

/// A single extraction rule.
///
/// Patterns are always compiled case-insensitive, multi-line and with `.`
/// matching newlines. A pattern that fails to compile is kept: the failure
/// surfaces as a [`RuleError`] every time the rule is evaluated.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    pattern: String,
    selection: GroupSelection,
    compiled: Result<Regex, RuleError>,
}

impl ExtractionRule {
    /// Create a rule with the default [`GroupSelection::FirstNonEmpty`] policy.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::with_selection(pattern, GroupSelection::default())
    }

    /// Create a rule with an explicit group-selection policy.
    pub fn with_selection(pattern: impl Into<String>, selection: GroupSelection) -> Self {
        let pattern = pattern.into();
        let compiled = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .multi_line(true)
            .crlf(true)
            .dot_matches_new_line(true)
            .size_limit(RULE_SIZE_LIMIT)
            .build()
            .map_err(|e| RuleError::InvalidPattern {
                pattern: pattern.clone(),
                reason: e.to_string(),
            });

        Self {
            pattern,
            selection,
            compiled,
        }
    }

    /// Pattern source text.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Group-selection policy.
    pub fn selection(&self) -> GroupSelection {
        self.selection
    }

    /// Whether the pattern compiled.
    pub fn is_valid(&self) -> bool {
        self.compiled.is_ok()
    }

    /// Evaluate the rule against `text`.
    ///
    /// Returns the whitespace-normalised value of the first match, or `None`
    /// when the pattern does not match. A match whose selected text is blank
    /// gives `Some("")`: the rule still counts as matched.
    pub fn evaluate(&self, text: &str) -> Result<Option<String>, RuleError> {
        let regex = self.compiled.as_ref().map_err(Clone::clone)?;

        let Some(caps) = regex.captures(text) else {
            return Ok(None);
        };

        Ok(Some(
            self.selection
                .select(&caps)
                .map(normalize_whitespace)
                .unwrap_or_default(),
        ))
    }
}
