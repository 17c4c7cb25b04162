//! Core library for rule-based field extraction from document text.
//!
//! This crate provides:
//! - Document profiles (rule sets, institution markers, label aliases)
//! - Field extraction with a label/value fallback pass
//! - Bank-statement transaction line parsing
//! - PDF text acquisition

pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod profile;
pub mod statement;

pub use error::{DocfieldsError, InputError, PdfError, ProfileError, Result, RuleError};
pub use extract::{extract, DocumentExtractor, FallbackScanner, FieldExtractor, ProfileExtractor, ResultFormatter};
pub use models::{
    DocfieldsConfig, DocumentOutput, ExtractionMetadata, ExtractionResult, FieldSource,
    StatementMetadata, StatementResult, TransactionRecord,
};
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::DocumentPipeline;
pub use profile::{DocumentKind, DocumentProfile, FieldSpec, ProfileRegistry};
pub use statement::{AmountClassifier, ClassificationPolicy, TransactionLineParser};
