//! Data models for extraction output and configuration.

pub mod config;
pub mod result;
pub mod transaction;

pub use config::DocfieldsConfig;
pub use result::{DocumentOutput, ExtractionMetadata, ExtractionResult, FieldSource};
pub use transaction::{StatementMetadata, StatementResult, TransactionRecord};
