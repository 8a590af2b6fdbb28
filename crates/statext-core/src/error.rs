//! Error types for the statext-core library.

use thiserror::Error;

use crate::models::statement::{BankIdentity, DateRange};

/// Main error type for the statext library.
#[derive(Error, Debug)]
pub enum StatextError {
    /// Statement parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Table or configuration deserialization error.
    #[error("table error: {0}")]
    Table(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the statement parsing pipeline.
///
/// Line-level problems are recovered silently inside the pipeline; only
/// whole-document failures surface here.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The document text was empty or whitespace-only.
    #[error("document text is empty")]
    EmptyInput,

    /// The whole document yielded zero transactions. Carries enough context
    /// for a human to decide whether the pattern tables need extending.
    #[error(
        "no transactions found in {file_name}: {text_length} chars, bank {bank}, range {date_range:?}"
    )]
    NoTransactions {
        file_name: String,
        text_length: usize,
        bank: BankIdentity,
        date_range: Option<DateRange>,
        /// Leading slice of the normalized text, for grammar maintainers.
        preview: String,
    },
}

/// Result type for the statext library.
pub type Result<T> = std::result::Result<T, StatextError>;
