//! Line-oriented transaction parser.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, trace};

use super::classify::{
    detect_cue, find_markers, keyword_hint, AmountClassifier, ClassificationPolicy, LineCues,
};
use super::patterns::{DESCRIPTION_DISALLOWED, SUMMARY_ROW};
use super::tokens::{find_amounts, find_date, find_reference};
use crate::extract::{normalize_whitespace, ResultFormatter};
use crate::models::config::StatementConfig;
use crate::models::{StatementResult, TransactionRecord};
use crate::profile::DocumentProfile;

/// Turns statement text into transaction records, one line at a time.
///
/// A line becomes a record when it carries a date, at least one debit or
/// credit amount, and a description with letters in it. Everything else
/// (headers, footers, totals) is skipped.
#[derive(Debug, Clone)]
pub struct TransactionLineParser {
    classifier: Arc<dyn AmountClassifier>,
    min_description_len: usize,
    skip_summary_rows: bool,
}

impl TransactionLineParser {
    pub fn new() -> Self {
        Self {
            classifier: Arc::new(ClassificationPolicy::default()),
            min_description_len: 3,
            skip_summary_rows: true,
        }
    }

    pub fn from_config(config: &StatementConfig) -> Self {
        Self {
            classifier: Arc::new(config.classification),
            min_description_len: config.min_description_len,
            skip_summary_rows: config.skip_summary_rows,
        }
    }

    pub fn with_policy(mut self, policy: ClassificationPolicy) -> Self {
        self.classifier = Arc::new(policy);
        self
    }

    /// Use a custom classifier for debit/credit/balance assignment.
    pub fn with_classifier(mut self, classifier: Arc<dyn AmountClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_min_description_len(mut self, len: usize) -> Self {
        self.min_description_len = len;
        self
    }

    pub fn with_summary_rows_skipped(mut self, skip: bool) -> Self {
        self.skip_summary_rows = skip;
        self
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Parse one line. `line_number` is 1-based.
    pub fn parse_line(&self, line: &str, line_number: usize) -> Option<TransactionRecord> {
        let Some(date) = find_date(line) else {
            trace!("line {}: no date", line_number);
            return None;
        };

        if self.skip_summary_rows && SUMMARY_ROW.is_match(line) {
            trace!("line {}: summary row", line_number);
            return None;
        }

        let reference = find_reference(line, &[date.position]);

        let mut claimed = vec![date.position];
        if let Some(r) = &reference {
            claimed.push(r.position);
        }

        let amounts = find_amounts(line, &claimed);
        claimed.extend(amounts.iter().map(|a| a.position));
        claimed.extend(find_markers(line, &amounts).iter().map(|m| m.position));

        let description = build_description(line, &claimed);
        if description.chars().count() < self.min_description_len
            || !description.chars().any(char::is_alphabetic)
        {
            trace!("line {}: description {:?} too weak", line_number, description);
            return None;
        }

        let values: Vec<_> = amounts.iter().map(|a| a.value).collect();
        let slots = self.classifier.classify(&LineCues {
            amounts: &values,
            cue: detect_cue(line, &amounts),
            hint: keyword_hint(&description),
        });

        if slots.debit.is_none() && slots.credit.is_none() {
            trace!("line {}: no debit or credit amount", line_number);
            return None;
        }

        Some(TransactionRecord {
            date: date.source,
            posted_on: date.value,
            description,
            reference_number: reference.map(|r| r.value),
            debit: slots.debit,
            credit: slots.credit,
            balance: slots.balance,
            line_number,
        })
    }

    /// Parse every line of `text`, keeping records in line order.
    pub fn parse(&self, text: &str) -> Vec<TransactionRecord> {
        let records: Vec<TransactionRecord> = text
            .lines()
            .enumerate()
            .filter_map(|(index, line)| self.parse_line(line, index + 1))
            .collect();

        debug!(
            "Parsed {} transactions from {} lines",
            records.len(),
            text.lines().count()
        );

        records
    }

    /// Parse `text` and wrap the records with statement metadata.
    pub fn parse_statement(
        &self,
        text: &str,
        profile: &DocumentProfile,
        timestamp: DateTime<Utc>,
    ) -> StatementResult {
        info!(
            "Parsing statement with profile {} and {} classification",
            profile.id(),
            self.classifier_name()
        );

        let transactions = self.parse(text);
        ResultFormatter::new().statement(profile, text, transactions, self.classifier_name(), timestamp)
    }
}

impl Default for TransactionLineParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Line text minus the claimed spans and stray symbols.
fn build_description(line: &str, claimed: &[(usize, usize)]) -> String {
    let mut spans = claimed.to_vec();
    spans.sort_unstable();

    let mut remaining = String::with_capacity(line.len());
    let mut cursor = 0;
    for (start, end) in spans {
        if start > cursor {
            remaining.push_str(&line[cursor..start]);
        }
        remaining.push(' ');
        cursor = cursor.max(end);
    }
    if cursor < line.len() {
        remaining.push_str(&line[cursor..]);
    }

    let cleaned = DESCRIPTION_DISALLOWED.replace_all(&remaining, "");

    normalize_whitespace(&cleaned)
        .trim_matches(|c: char| matches!(c, '-' | '/' | ',' | '.' | ':' | ' '))
        .to_string()
}
