//! Statement data models produced by the parsing pipeline.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Known bank identities detectable from statement text.
///
/// The set is closed; which text maps to which identity is driven by the
/// ordered bank pattern table, so new phrasings can be added as configuration
/// without touching this enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankIdentity {
    Sbi,
    Hdfc,
    Icici,
    Axis,
    Kotak,
    Pnb,
    BankOfBaroda,
    Canara,
    UnionBank,
    Idbi,
    YesBank,
    IndusInd,
    #[default]
    Unknown,
}

impl BankIdentity {
    /// Human-readable bank name.
    pub fn display(&self) -> &'static str {
        match self {
            BankIdentity::Sbi => "State Bank of India",
            BankIdentity::Hdfc => "HDFC Bank",
            BankIdentity::Icici => "ICICI Bank",
            BankIdentity::Axis => "Axis Bank",
            BankIdentity::Kotak => "Kotak Mahindra Bank",
            BankIdentity::Pnb => "Punjab National Bank",
            BankIdentity::BankOfBaroda => "Bank of Baroda",
            BankIdentity::Canara => "Canara Bank",
            BankIdentity::UnionBank => "Union Bank of India",
            BankIdentity::Idbi => "IDBI Bank",
            BankIdentity::YesBank => "Yes Bank",
            BankIdentity::IndusInd => "IndusInd Bank",
            BankIdentity::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for BankIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TxnKind {
    Debit,
    Credit,
    #[default]
    Unknown,
}

/// Statement period in the textual form the source used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

/// Account metadata detected from the statement header region.
///
/// Every field is independently optional; detection misses are advisory,
/// never fatal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
}

impl AccountInfo {
    /// Check whether any field was detected.
    pub fn is_empty(&self) -> bool {
        self.account_number.is_none()
            && self.customer_name.is_none()
            && self.branch_name.is_none()
            && self.ifsc_code.is_none()
    }
}

/// A single parsed transaction.
///
/// Created once by the field-parser/classifier/extractor chain and immutable
/// thereafter. Invariant: exactly one of `debit_text`/`credit_text` is
/// non-empty iff `kind` is not `Unknown`, and the sign of `amount` agrees
/// with `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    /// Transaction date as printed on the statement.
    pub transaction_date: String,

    /// Value date; defaults to the transaction date when only one date was
    /// present on the line.
    pub value_date: String,

    /// Free-text description, whitespace-collapsed, footer fragments removed.
    pub description: String,

    /// Long digit run (12+) pulled from the description, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,

    /// Signed amount: negative for debits, positive for credits.
    pub amount: Decimal,

    /// Raw matched amount text when the transaction is a debit.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub debit_text: String,

    /// Raw matched amount text when the transaction is a credit.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub credit_text: String,

    /// Running balance after this transaction, separators stripped.
    pub balance: Decimal,

    /// Debit/credit classification.
    pub kind: TxnKind,

    /// Standardized counterparty name, when one could be extracted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,

    /// Bank associated with the counterparty, when a bank token resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_bank: Option<BankIdentity>,

    /// Spending category; always populated (falls back to the default).
    pub category: String,
}

impl ParsedTransaction {
    /// Check the kind/amount/echo-text invariant.
    pub fn is_consistent(&self) -> bool {
        match self.kind {
            TxnKind::Debit => {
                self.amount <= Decimal::ZERO
                    && !self.debit_text.is_empty()
                    && self.credit_text.is_empty()
            }
            TxnKind::Credit => {
                self.amount >= Decimal::ZERO
                    && !self.credit_text.is_empty()
                    && self.debit_text.is_empty()
            }
            TxnKind::Unknown => self.debit_text.is_empty() && self.credit_text.is_empty(),
        }
    }
}

/// Successful parse of one statement document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedStatement {
    /// Detected bank identity.
    pub bank: BankIdentity,

    /// Statement period, when a range template matched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,

    /// Detected account metadata; advisory, echoed back to the caller.
    pub account_info: AccountInfo,

    /// Transactions in document order.
    pub transactions: Vec<ParsedTransaction>,

    /// Count of extracted transactions.
    pub transactions_found: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_invariant() {
        let txn = ParsedTransaction {
            transaction_date: "1 JUL 2025".into(),
            value_date: "1 JUL 2025".into(),
            description: "TO TRANSFER-TEST".into(),
            reference_number: None,
            amount: Decimal::new(-489400, 2),
            debit_text: "4,894.00".into(),
            credit_text: String::new(),
            balance: Decimal::new(830814, 2),
            kind: TxnKind::Debit,
            recipient: None,
            recipient_bank: None,
            category: "Personal".into(),
        };
        assert!(txn.is_consistent());

        let broken = ParsedTransaction {
            amount: Decimal::new(489400, 2),
            ..txn
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_account_info_is_empty() {
        assert!(AccountInfo::default().is_empty());
        let info = AccountInfo {
            ifsc_code: Some("SBIN0001234".into()),
            ..Default::default()
        };
        assert!(!info.is_empty());
    }
}
