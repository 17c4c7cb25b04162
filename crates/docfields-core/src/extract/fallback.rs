//! Generic `Label: value` scanner for fields the primary rules missed.

use tracing::debug;

use super::engine::FieldValues;
use super::normalize_whitespace;
use crate::models::FieldSource;
use crate::profile::{AliasTable, DocumentProfile};

/// A recognised `Label: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelToken {
    /// Label text as printed.
    pub label: String,
    /// Field the label maps to.
    pub field: String,
    pub value: String,
    /// 1-based line number.
    pub line: usize,
}

/// Second pass over the text that fills empty fields from labelled values.
///
/// A value runs from the label's separator to the next recognised label on
/// the same line, or to the end of the line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackScanner;

impl FallbackScanner {
    pub fn new() -> Self {
        Self
    }

    /// All label/value tokens for the labels in `aliases`, in text order.
    pub fn scan(&self, text: &str, aliases: &AliasTable) -> Vec<LabelToken> {
        let Some(matcher) = aliases.matcher() else {
            return Vec::new();
        };

        let mut tokens = Vec::new();

        for (index, line) in text.lines().enumerate() {
            let hits: Vec<(&str, usize, usize)> = matcher
                .captures_iter(line)
                .filter_map(|caps| {
                    let whole = caps.get(0)?;
                    let label = caps.name("label")?;
                    Some((label.as_str(), whole.start(), whole.end()))
                })
                .collect();

            for (i, &(label, _, value_start)) in hits.iter().enumerate() {
                let value_end = hits.get(i + 1).map_or(line.len(), |next| next.1);
                let value = clean_value(&line[value_start..value_end]);
                if value.is_empty() {
                    continue;
                }

                let Some(field) = aliases.field_for(label) else {
                    continue;
                };

                tokens.push(LabelToken {
                    label: normalize_whitespace(label),
                    field: field.to_string(),
                    value,
                    line: index + 1,
                });
            }
        }

        tokens
    }

    /// Fill still-empty fields of `values` from the profile's alias table.
    ///
    /// The first token for a field wins. Returns the number of fields filled.
    pub fn fill(&self, text: &str, profile: &DocumentProfile, values: &mut FieldValues) -> usize {
        let mut filled = 0;

        for token in self.scan(text, profile.aliases()) {
            if !values.is_empty_field(&token.field) {
                continue;
            }

            debug!(
                "{}: fallback via {:?} on line {} -> {:?}",
                token.field, token.label, token.line, token.value
            );

            let source = FieldSource::Fallback { label: token.label };
            if values.fill(&token.field, token.value, source) {
                filled += 1;
            }
        }

        filled
    }
}

fn clean_value(raw: &str) -> String {
    let value = normalize_whitespace(raw);
    value
        .trim_end_matches([',', ';', '|'])
        .trim_end()
        .to_string()
}
