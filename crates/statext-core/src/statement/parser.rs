//! Statement pipeline orchestrator.

use std::time::Instant;

use tracing::{debug, info};

use crate::error::ParseError;
use crate::models::config::ParsingConfig;
use crate::models::statement::{
    BankIdentity, ParsedStatement, ParsedTransaction, TxnKind,
};

use super::rules::categorize::{categorize, standardize_recipient};
use super::rules::classify::classify;
use super::rules::fields::{parse_candidate, ParsedFields};
use super::rules::metadata::detect_metadata;
use super::rules::normalize::normalize_lines;
use super::rules::recipient::extract_recipient;
use super::rules::reconstruct::reconstruct;
use super::tables::PatternTables;
use super::Result;

/// Result of parsing one document.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// The parsed statement.
    pub statement: ParsedStatement,
    /// Extraction warnings worth a human look (field-level misses).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Statement parser: sequences normalization, metadata detection, line
/// reconstruction, and per-candidate field extraction into one immutable
/// transaction list.
///
/// Pure and synchronous per document; a parser can be reused across
/// documents since the tables are read-only after construction.
pub struct StatementParser {
    config: ParsingConfig,
    tables: PatternTables,
}

impl StatementParser {
    /// Create a parser with default tunables and built-in tables.
    pub fn new() -> Self {
        Self {
            config: ParsingConfig::default(),
            tables: PatternTables::default(),
        }
    }

    /// Set field-parser tunables.
    pub fn with_config(mut self, config: ParsingConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap in configured pattern tables (ordering preserved as given).
    pub fn with_tables(mut self, tables: PatternTables) -> Self {
        self.tables = tables;
        self
    }

    /// Parse one document of extracted text into a statement.
    pub fn parse(&self, text: &str, file_name: &str) -> Result<ParseOutcome> {
        let start = Instant::now();

        if text.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        info!("parsing {file_name}: {} chars", text.len());

        let lines = normalize_lines(text);
        let metadata = detect_metadata(&lines, &self.tables);
        debug!(
            "detected bank {}, range {:?}",
            metadata.bank, metadata.date_range
        );

        let candidates = reconstruct(&lines);
        debug!("{} candidate lines", candidates.len());

        let mut transactions = Vec::with_capacity(candidates.len());
        let mut warnings = Vec::new();

        for candidate in &candidates {
            let Some(fields) = parse_candidate(candidate, &self.config) else {
                continue;
            };
            transactions.push(self.build_transaction(fields, &mut warnings));
        }

        if transactions.is_empty() {
            return Err(ParseError::NoTransactions {
                file_name: file_name.to_string(),
                text_length: text.len(),
                bank: metadata.bank,
                date_range: metadata.date_range,
                preview: preview(&lines, self.config.preview_len),
            });
        }

        let transactions_found = transactions.len();
        info!("extracted {transactions_found} transactions from {file_name}");

        Ok(ParseOutcome {
            statement: ParsedStatement {
                bank: metadata.bank,
                date_range: metadata.date_range,
                account_info: metadata.account_info,
                transactions,
                transactions_found,
            },
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn build_transaction(
        &self,
        fields: ParsedFields,
        warnings: &mut Vec<String>,
    ) -> ParsedTransaction {
        // Without an isolated amount there is nothing to echo into the
        // debit/credit text, so the kind stays unknown and the transaction
        // surfaces for inspection via description/reference only.
        let kind = if fields.amount_text.is_some() {
            classify(&fields.description)
        } else {
            warnings.push(format!(
                "no amount grammar matched: {}",
                fields.description
            ));
            TxnKind::Unknown
        };

        let parts = extract_recipient(&fields.description);
        let recipient = parts
            .recipient
            .as_deref()
            .map(|r| standardize_recipient(&self.tables, r));
        let recipient_bank = parts
            .bank
            .as_deref()
            .map(|b| self.tables.bank_of(b))
            .filter(|b| *b != BankIdentity::Unknown);
        let category = categorize(&self.tables, recipient.as_deref(), &fields.description);

        let amount_text = fields.amount_text.unwrap_or_default();
        let (amount, debit_text, credit_text) = match kind {
            TxnKind::Debit => (-fields.amount, amount_text, String::new()),
            TxnKind::Credit => (fields.amount, String::new(), amount_text),
            TxnKind::Unknown => (fields.amount, String::new(), String::new()),
        };

        ParsedTransaction {
            transaction_date: fields.transaction_date,
            value_date: fields.value_date,
            description: fields.description,
            reference_number: fields.reference_number,
            amount,
            debit_text,
            credit_text,
            balance: fields.balance,
            kind,
            recipient,
            recipient_bank,
            category,
        }
    }
}

impl Default for StatementParser {
    fn default() -> Self {
        Self::new()
    }
}

fn preview(lines: &[String], max_len: usize) -> String {
    lines.join(" ").chars().take(max_len).collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use super::*;
    use crate::statement::rules::fields::parse_amount;

    fn parse(text: &str) -> Result<ParseOutcome> {
        StatementParser::new().parse(text, "statement.txt")
    }

    const SBI_STATEMENT: &str = "\
Statement of Account
State Bank of India
Account Name: SOORAJ KUMAR
Account Number: 37608337103456
IFSC: SBIN0001234
Statement from 1 JUL 2025 to 31 JUL 2025
Txn Date Value Date Description Debit Credit Balance
1 JUL 2025 1 JUL 2025 TO TRANSFER-MARGIN MONEY SOORAJ- TRANSFER TO 37608337103 4,894.00 8,308.14
2 JUL 2025 2 JUL 2025 BY TRANSFER-NEFT-SBIN0001234-ACME CORP SALARY-- 50,000.00 58,308.14
This is a computer generated statement and does not require a signature
3 JUL 2025 3 JUL 2025 ATM CASH 517896
2,000.00 56,308.14
1 AUG 2025 CREDIT INTEREST--123.00 56,431.14
";

    #[test]
    fn test_transfer_debit_end_to_end() {
        let outcome = parse(SBI_STATEMENT).unwrap();
        let statement = &outcome.statement;

        assert_eq!(statement.bank, BankIdentity::Sbi);
        assert_eq!(
            statement.date_range.as_ref().unwrap().from,
            "1 JUL 2025"
        );
        assert_eq!(
            statement.account_info.customer_name.as_deref(),
            Some("SOORAJ KUMAR")
        );

        let txn = &statement.transactions[0];
        assert_eq!(txn.kind, TxnKind::Debit);
        assert_eq!(txn.amount, -parse_amount("4894.00"));
        assert_eq!(txn.balance, parse_amount("8308.14"));
        assert_eq!(txn.debit_text, "4,894.00");
        assert_eq!(txn.credit_text, "");
        assert_eq!(txn.recipient.as_deref(), Some("Margin Money Deposit"));
        assert_eq!(txn.category, "Investments");
    }

    #[test]
    fn test_wrapped_and_interest_lines() {
        let outcome = parse(SBI_STATEMENT).unwrap();
        let statement = &outcome.statement;
        assert_eq!(statement.transactions_found, 4);

        // ATM line was wrapped across two physical lines
        let atm = &statement.transactions[2];
        assert_eq!(atm.kind, TxnKind::Debit);
        assert_eq!(atm.amount, -parse_amount("2000.00"));
        assert_eq!(atm.recipient, None);
        assert_eq!(atm.category, "Cash");

        // Interest line uses the "--" grammar
        let interest = &statement.transactions[3];
        assert_eq!(interest.kind, TxnKind::Credit);
        assert_eq!(interest.amount, parse_amount("123.00"));
        assert_eq!(interest.credit_text, "123.00");
    }

    #[test]
    fn test_neft_credit_resolves_recipient_bank() {
        let outcome = parse(SBI_STATEMENT).unwrap();
        let neft = &outcome.statement.transactions[1];
        assert_eq!(neft.kind, TxnKind::Credit);
        assert_eq!(neft.recipient_bank, Some(BankIdentity::Sbi));
        assert_eq!(neft.amount, parse_amount("50000.00"));
    }

    #[test]
    fn test_concatenated_transactions_split_into_two() {
        let text = "\
1 JUL 2025 1 JUL 2025 TO TRANSFER-RENT JULY- 15,000.00 45,000.002 JUL 2025 2 JUL 2025 BY TRANSFER-REFUND STORE- 500.00 45,500.00
";
        let outcome = parse(text).unwrap();
        assert_eq!(outcome.statement.transactions_found, 2);
        assert_eq!(outcome.statement.transactions[0].kind, TxnKind::Debit);
        assert_eq!(outcome.statement.transactions[1].kind, TxnKind::Credit);
    }

    #[test]
    fn test_date_only_line_yields_nothing() {
        let text = "\
1 JUL 2025 1 JUL 2025 BY TRANSFER-X SOMEONE- 100.00 1,100.00
3 AUG 2025
";
        let outcome = parse(text).unwrap();
        assert_eq!(outcome.statement.transactions_found, 1);
    }

    #[test]
    fn test_unparseable_document_is_typed_failure() {
        let err = parse("Dear customer, your statement could not be rendered. Contact support.")
            .unwrap_err();
        match err {
            ParseError::NoTransactions {
                text_length,
                bank,
                preview,
                ..
            } => {
                assert!(text_length > 0);
                assert_eq!(bank, BankIdentity::Unknown);
                assert!(!preview.is_empty());
            }
            other => panic!("expected NoTransactions, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse("   \n  "), Err(ParseError::EmptyInput)));
    }

    #[test]
    fn test_sign_invariant_holds_for_all_transactions() {
        let outcome = parse(SBI_STATEMENT).unwrap();
        for txn in &outcome.statement.transactions {
            assert!(txn.is_consistent(), "inconsistent transaction: {txn:?}");
            match txn.kind {
                TxnKind::Debit => assert!(txn.amount <= Decimal::ZERO),
                TxnKind::Credit => assert!(txn.amount >= Decimal::ZERO),
                TxnKind::Unknown => {
                    assert!(txn.debit_text.is_empty() && txn.credit_text.is_empty())
                }
            }
        }
    }
}
