//! Error types for the docfields-core library.

use thiserror::Error;

/// Main error type for the docfields library.
#[derive(Error, Debug)]
pub enum DocfieldsError {
    /// Profile lookup or validation error.
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Caller-supplied input was rejected.
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Structural problems with a document profile.
///
/// These are raised when a profile is built, registered or looked up. A
/// profile that passes validation never makes extraction fail.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// No profile with the requested id is registered.
    #[error("unknown profile: {0}")]
    Unknown(String),

    /// Profile id is empty or whitespace.
    #[error("profile id must not be empty")]
    EmptyId,

    /// A profile with the same id is already registered.
    #[error("profile {0} is already registered")]
    Duplicate(String),

    /// A field spec has an empty name.
    #[error("profile {profile} declares a field with an empty name")]
    EmptyFieldName { profile: String },

    /// The same field name is declared twice.
    #[error("profile {profile} declares field {field} more than once")]
    DuplicateField { profile: String, field: String },

    /// A field-map profile without any fields.
    #[error("profile {profile} declares no fields")]
    NoFields { profile: String },

    /// Alias points at a field the profile does not declare.
    #[error("profile {profile} maps alias {alias:?} to undeclared field {field}")]
    UnknownAliasTarget {
        profile: String,
        alias: String,
        field: String,
    },

    /// Alias label without any letters or digits.
    #[error("alias {alias:?} has no alphanumeric characters")]
    EmptyAlias { alias: String },

    /// Two aliases normalise to the same label but target different fields.
    #[error("alias {alias:?} maps to both {first} and {second}")]
    ConflictingAlias {
        alias: String,
        first: String,
        second: String,
    },

    /// The combined alias matcher failed to compile.
    #[error("failed to compile alias matcher: {0}")]
    AliasMatcher(#[from] regex::Error),
}

/// Failure of a single extraction rule.
///
/// Contained to the field that owns the rule: the field stays empty and the
/// failure is reported as a warning on the extraction result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// The rule's pattern does not compile.
    #[error("invalid pattern {pattern:?}: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Rejected caller input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Source text is empty or whitespace only.
    #[error("source text is empty")]
    EmptyText,

    /// Source text exceeds the configured ceiling.
    #[error("source text is {length} bytes, limit is {limit}")]
    TooLarge { length: usize, limit: usize },
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Result type for the docfields library.
pub type Result<T> = std::result::Result<T, DocfieldsError>;
