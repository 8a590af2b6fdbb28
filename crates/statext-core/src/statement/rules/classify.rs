//! Debit/credit classification from transaction descriptions.
//!
//! Transfer idioms take precedence over the keyword lists: tags like "NEFT"
//! or "UPI" appear in both directions and only the idiom disambiguates them,
//! so the idiom check MUST run first.

use crate::models::statement::TxnKind;

/// Phrase marking an outgoing transfer.
const DEBIT_IDIOM: &str = "TO TRANSFER";

/// Phrase marking an incoming transfer.
const CREDIT_IDIOM: &str = "BY TRANSFER";

/// Generic debit keywords, consulted in order after the idioms.
const DEBIT_KEYWORDS: &[&str] = &[
    "WITHDRAWAL",
    "ATM",
    "WDL",
    "POS ",
    "PURCHASE",
    "EMI",
    "BILLPAY",
    "BILL PAY",
    "/DR/",
    "CHARGES",
    "CHRG",
    "DEBIT",
    "PAID",
];

/// Generic credit keywords, consulted after the debit list.
const CREDIT_KEYWORDS: &[&str] = &[
    "DEPOSIT",
    "SALARY",
    "INTEREST",
    "REFUND",
    "CASHBACK",
    "DIVIDEND",
    "/CR/",
    "CREDIT",
    "RECEIVED",
];

/// Classify a transaction from its (uppercased) description. Deterministic
/// and total.
pub fn classify(description: &str) -> TxnKind {
    if description.contains(DEBIT_IDIOM) {
        return TxnKind::Debit;
    }
    if description.contains(CREDIT_IDIOM) {
        return TxnKind::Credit;
    }

    if DEBIT_KEYWORDS.iter().any(|k| description.contains(k)) {
        return TxnKind::Debit;
    }
    if CREDIT_KEYWORDS.iter().any(|k| description.contains(k)) {
        return TxnKind::Credit;
    }

    TxnKind::Unknown
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_idioms_win_over_keywords() {
        // "NEFT" and "CREDIT" both appear; the outgoing idiom decides
        assert_eq!(
            classify("TO TRANSFER-NEFT-SBIN0001234-CREDIT SOCIETY--"),
            TxnKind::Debit
        );
        assert_eq!(
            classify("BY TRANSFER-NEFT-ACME PAYMENTS DEBIT DESK-"),
            TxnKind::Credit
        );
    }

    #[test]
    fn test_keyword_fallbacks() {
        assert_eq!(classify("ATM WDL-123456-MG ROAD"), TxnKind::Debit);
        assert_eq!(classify("UPI/DR/517896432109/RAHUL"), TxnKind::Debit);
        assert_eq!(classify("UPI/CR/517896432109/RAHUL"), TxnKind::Credit);
        assert_eq!(classify("CREDIT INTEREST"), TxnKind::Credit);
        assert_eq!(classify("SALARY JULY 2025"), TxnKind::Credit);
    }

    #[test]
    fn test_unknown_when_nothing_matches() {
        assert_eq!(classify("CHEQUE 001234 CLEARING"), TxnKind::Unknown);
        assert_eq!(classify(""), TxnKind::Unknown);
    }
}
