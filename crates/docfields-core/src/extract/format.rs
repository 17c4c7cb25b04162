//! Packaging of pass output into results with completeness metadata.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::engine::FieldValues;
use crate::models::{
    ExtractionMetadata, ExtractionResult, StatementMetadata, StatementResult, TransactionRecord,
};
use crate::profile::DocumentProfile;

/// Builds result records from extractor and parser output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Wrap a field map with filled/total counts, source length and timestamp.
    pub fn fields(
        &self,
        profile: &DocumentProfile,
        text: &str,
        values: FieldValues,
        timestamp: DateTime<Utc>,
    ) -> ExtractionResult {
        let (outcomes, warnings) = values.into_parts();

        let mut fields = indexmap::IndexMap::with_capacity(outcomes.len());
        let mut sources = indexmap::IndexMap::with_capacity(outcomes.len());
        for (name, outcome) in outcomes {
            fields.insert(name.clone(), outcome.value);
            sources.insert(name, outcome.source);
        }

        let filled_field_count = fields.values().filter(|v| !v.is_empty()).count();

        ExtractionResult {
            profile: profile.id().to_string(),
            metadata: ExtractionMetadata {
                filled_field_count,
                total_field_count: fields.len(),
                source_text_length: text.chars().count(),
                timestamp,
            },
            fields,
            sources,
            warnings,
        }
    }

    /// Wrap parsed transactions with counts and totals.
    pub fn statement(
        &self,
        profile: &DocumentProfile,
        text: &str,
        transactions: Vec<TransactionRecord>,
        policy: &str,
        timestamp: DateTime<Utc>,
    ) -> StatementResult {
        let total_debit: Decimal = transactions.iter().filter_map(|t| t.debit).sum();
        let total_credit: Decimal = transactions.iter().filter_map(|t| t.credit).sum();

        StatementResult {
            profile: profile.id().to_string(),
            metadata: StatementMetadata {
                transaction_count: transactions.len(),
                lines_scanned: text.lines().count(),
                total_debit,
                total_credit,
                classification_policy: policy.to_string(),
                source_text_length: text.chars().count(),
                timestamp,
            },
            transactions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FieldExtractor;
    use crate::profile::{DocumentKind, ExtractionRule, FieldSpec};
    use std::str::FromStr;

    #[test]
    fn test_field_metadata() {
        let profile = DocumentProfile::builder("p")
            .field(FieldSpec::new("a").rule(ExtractionRule::new(r"A=(\d+)")))
            .field(FieldSpec::new("b").rule(ExtractionRule::new(r"B=(\d+)")))
            .build()
            .unwrap();

        let text = "A=1 ₹";
        let values = FieldExtractor::new().apply(text, &profile);
        let now = Utc::now();
        let result = ResultFormatter::new().fields(&profile, text, values, now);

        assert_eq!(result.profile, "p");
        assert_eq!(result.metadata.filled_field_count, 1);
        assert_eq!(result.metadata.total_field_count, 2);
        assert_eq!(result.metadata.source_text_length, 5);
        assert_eq!(result.metadata.timestamp, now);
        assert_eq!(result.fields.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_statement_totals() {
        let profile = DocumentProfile::builder("bank")
            .kind(DocumentKind::BankStatement)
            .build()
            .unwrap();

        let record = |debit: Option<&str>, credit: Option<&str>| TransactionRecord {
            date: "01/04/2024".to_string(),
            posted_on: None,
            description: "X".to_string(),
            reference_number: None,
            debit: debit.map(|d| Decimal::from_str(d).unwrap()),
            credit: credit.map(|c| Decimal::from_str(c).unwrap()),
            balance: None,
            line_number: 1,
        };

        let result = ResultFormatter::new().statement(
            &profile,
            "line one\nline two",
            vec![record(Some("100.50"), None), record(None, Some("20.00")), record(Some("9.50"), None)],
            "second-is-balance",
            Utc::now(),
        );

        assert_eq!(result.metadata.transaction_count, 3);
        assert_eq!(result.metadata.lines_scanned, 2);
        assert_eq!(result.metadata.total_debit, Decimal::from_str("110.00").unwrap());
        assert_eq!(result.metadata.total_credit, Decimal::from_str("20.00").unwrap());
        assert_eq!(result.metadata.classification_policy, "second-is-balance");
    }
}
