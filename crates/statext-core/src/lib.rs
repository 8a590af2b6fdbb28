//! Core library for bank statement text parsing.
//!
//! This crate provides:
//! - Normalization of extracted statement text
//! - Statement metadata detection (bank identity, period, account fields)
//! - Transaction line reconstruction from layout-garbled text
//! - Per-transaction field extraction, classification, and categorization
//!
//! Text extraction from the original document (PDF/OCR) is a collaborator
//! concern; this crate starts from a blob of extracted text.

pub mod error;
pub mod models;
pub mod statement;

pub use error::{ParseError, Result, StatextError};
pub use models::config::{ParsingConfig, StatextConfig};
pub use models::statement::{
    AccountInfo, BankIdentity, DateRange, ParsedStatement, ParsedTransaction, TxnKind,
};
pub use statement::tables::PatternTables;
pub use statement::{ParseOutcome, StatementParser};
