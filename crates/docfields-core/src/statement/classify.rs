//! Debit/credit/balance assignment for the amounts on a transaction line.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::patterns::{CREDIT_HINTS, CREDIT_WORDS, DEBIT_HINTS, DEBIT_WORDS, DR_CR_MARKER};
use super::tokens::TokenMatch;

/// Debit or credit side of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Debit,
    Credit,
}

/// Amounts assigned to the record slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountSlots {
    pub debit: Option<Decimal>,
    pub credit: Option<Decimal>,
    pub balance: Option<Decimal>,
}

impl AmountSlots {
    fn on(side: Side, amount: Decimal) -> Self {
        match side {
            Side::Debit => Self {
                debit: Some(amount),
                ..Self::default()
            },
            Side::Credit => Self {
                credit: Some(amount),
                ..Self::default()
            },
        }
    }

    fn with_balance(mut self, balance: Decimal) -> Self {
        self.balance = Some(balance);
        self
    }
}

/// What the classifier knows about a line.
#[derive(Debug, Clone, Copy)]
pub struct LineCues<'a> {
    /// Amounts in positional order.
    pub amounts: &'a [Decimal],
    /// Explicit DR/CR marker or debit/credit word on the line.
    pub cue: Option<Side>,
    /// Side suggested by description keywords.
    pub hint: Option<Side>,
}

/// Trait for debit/credit/balance classifiers.
pub trait AmountClassifier: Send + Sync + fmt::Debug {
    /// Assign the line's amounts to slots.
    fn classify(&self, cues: &LineCues<'_>) -> AmountSlots;

    /// Name reported in statement metadata.
    fn name(&self) -> &str;
}

/// How two uncued amounts on one line are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationPolicy {
    /// Transaction amount then running balance.
    #[default]
    SecondIsBalance,
    /// Debit column then credit column.
    SecondIsCredit,
}

impl ClassificationPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SecondIsBalance => "second-is-balance",
            Self::SecondIsCredit => "second-is-credit",
        }
    }
}

impl fmt::Display for ClassificationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ClassificationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "second-is-balance" => Ok(Self::SecondIsBalance),
            "second-is-credit" => Ok(Self::SecondIsCredit),
            other => Err(format!(
                "unknown classification policy '{}' (expected second-is-balance or second-is-credit)",
                other
            )),
        }
    }
}

impl AmountClassifier for ClassificationPolicy {
    fn classify(&self, cues: &LineCues<'_>) -> AmountSlots {
        let amounts = cues.amounts;
        let (Some(&first), Some(&last)) = (amounts.first(), amounts.last()) else {
            return AmountSlots::default();
        };

        if let Some(side) = cues.cue {
            let slots = AmountSlots::on(side, first);
            return if amounts.len() >= 2 {
                slots.with_balance(last)
            } else {
                slots
            };
        }

        match amounts.len() {
            1 => AmountSlots::on(cues.hint.unwrap_or(Side::Debit), first),
            2 => match self {
                Self::SecondIsBalance => {
                    AmountSlots::on(cues.hint.unwrap_or(Side::Debit), first).with_balance(last)
                }
                Self::SecondIsCredit => AmountSlots {
                    debit: non_zero(first),
                    credit: non_zero(last),
                    balance: None,
                },
            },
            _ => AmountSlots {
                debit: non_zero(first),
                credit: non_zero(amounts[1]),
                balance: Some(last),
            },
        }
    }

    fn name(&self) -> &str {
        ClassificationPolicy::name(self)
    }
}

// Empty columns are often printed as 0.00
fn non_zero(amount: Decimal) -> Option<Decimal> {
    (!amount.is_zero()).then_some(amount)
}

/// Explicit side cue for a line.
///
/// A standalone DR/CR marker wins over debit/credit words. A marker printed
/// after the last of two or more amounts describes the balance and is
/// ignored. Conflicting cues count as no cue.
pub fn detect_cue(line: &str, amounts: &[TokenMatch<Decimal>]) -> Option<Side> {
    let balance_suffix_from = match amounts {
        [.., last] if amounts.len() >= 2 => Some(last.end()),
        _ => None,
    };

    let markers: Vec<Side> = find_markers(line, amounts)
        .into_iter()
        .filter(|marker| !balance_suffix_from.is_some_and(|from| marker.start() >= from))
        .map(|marker| marker.value)
        .collect();

    if !markers.is_empty() {
        return agreed(&markers);
    }

    match (DEBIT_WORDS.is_match(line), CREDIT_WORDS.is_match(line)) {
        (true, false) => Some(Side::Debit),
        (false, true) => Some(Side::Credit),
        _ => None,
    }
}

/// DR/CR markers that sit next to an amount or end the line.
///
/// Anything else spelled DR or CR, such as the title in `TO DR. SHAH`, is
/// ordinary description text.
pub fn find_markers(line: &str, amounts: &[TokenMatch<Decimal>]) -> Vec<TokenMatch<Side>> {
    DR_CR_MARKER
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let marker = caps.name("side")?;
            let span = (whole.start(), whole.end());

            if amounts.iter().any(|a| a.overlaps(span)) {
                return None;
            }

            let ends_line = line[span.1..].trim().is_empty();
            let beside_amount = amounts.iter().any(|a| {
                (a.end() <= span.0 && line[a.end()..span.0].trim().is_empty())
                    || (span.1 <= a.start() && line[span.1..a.start()].trim().is_empty())
            });
            if !ends_line && !beside_amount {
                return None;
            }

            let side = if marker.as_str().eq_ignore_ascii_case("dr") {
                Side::Debit
            } else {
                Side::Credit
            };
            Some(TokenMatch::new(side, whole.as_str(), span))
        })
        .collect()
}

/// Side suggested by description keywords such as SALARY or ATM.
pub fn keyword_hint(description: &str) -> Option<Side> {
    match (DEBIT_HINTS.is_match(description), CREDIT_HINTS.is_match(description)) {
        (true, false) => Some(Side::Debit),
        (false, true) => Some(Side::Credit),
        _ => None,
    }
}

fn agreed(sides: &[Side]) -> Option<Side> {
    let first = *sides.first()?;
    sides.iter().all(|s| *s == first).then_some(first)
}
