//! Bank-statement transaction records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One recognised statement line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Date text as printed.
    pub date: String,
    /// Parsed calendar date, when the printed date is valid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_on: Option<NaiveDate>,
    pub description: String,
    pub reference_number: Option<String>,
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    pub balance: Option<Decimal>,
    /// 1-based line number in the source text.
    pub line_number: usize,
}

impl TransactionRecord {
    /// Signed movement: credit minus debit.
    pub fn net_amount(&self) -> Decimal {
        self.credit.unwrap_or_default() - self.debit.unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementMetadata {
    pub transaction_count: usize,
    pub lines_scanned: usize,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    /// Name of the amount classification policy in effect.
    pub classification_policy: String,
    /// Length of the source text in characters.
    pub source_text_length: usize,
    pub timestamp: DateTime<Utc>,
}

/// Ordered transactions parsed from one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementResult {
    pub profile: String,
    pub transactions: Vec<TransactionRecord>,
    pub metadata: StatementMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_net_amount() {
        let record = TransactionRecord {
            date: "15/04/2024".to_string(),
            posted_on: NaiveDate::from_ymd_opt(2024, 4, 15),
            description: "NEFT TRANSFER".to_string(),
            reference_number: None,
            debit: None,
            credit: Some(Decimal::from_str("5000.00").unwrap()),
            balance: Some(Decimal::from_str("45200.00").unwrap()),
            line_number: 3,
        };

        assert_eq!(record.net_amount(), Decimal::from_str("5000.00").unwrap());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["credit"], "5000.00");
        assert_eq!(json["posted_on"], "2024-04-15");
        assert!(json["debit"].is_null());
    }
}
