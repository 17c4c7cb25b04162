//! Bank-statement transaction parsing.

mod classify;
mod parser;
pub mod patterns;
mod tokens;

pub use classify::{
    detect_cue, find_markers, keyword_hint, AmountClassifier, AmountSlots, ClassificationPolicy, LineCues, Side,
};
pub use parser::TransactionLineParser;
pub use tokens::{find_amounts, find_date, find_reference, parse_amount, parse_statement_date, TokenMatch};
