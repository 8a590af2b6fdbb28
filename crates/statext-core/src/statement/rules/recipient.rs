//! Counterparty extraction from transfer-reference syntax.
//!
//! Statements embed the counterparty inside scheme-specific reference
//! strings (NEFT, UPI, plain transfer markers, ATM withdrawals). The schemes
//! are tried in a fixed cascade; the first match wins. Most non-transfer
//! transactions match nothing, which is expected and not an error.

use regex::{Captures, Regex};
use tracing::debug;

use super::patterns::{
    ATM_SCHEME, INCOMING_SCHEME, NEFT_SCHEME, OUTGOING_SCHEME, UPI_BANK_SCHEME, UPI_PLAIN_SCHEME,
};

/// Raw counterparty tokens pulled from one description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientParts {
    /// Raw counterparty text, uncleaned beyond token trimming.
    pub recipient: Option<String>,
    /// Raw bank token (IFSC code or UPI bank tag), when the scheme carried
    /// one.
    pub bank: Option<String>,
}

type SchemeHandler = fn(&Captures<'_>) -> RecipientParts;

fn bank_then_name(caps: &Captures<'_>) -> RecipientParts {
    RecipientParts {
        recipient: caps.get(2).map(|m| clean_token(m.as_str())),
        bank: caps.get(1).map(|m| m.as_str().to_string()),
    }
}

fn name_then_bank(caps: &Captures<'_>) -> RecipientParts {
    RecipientParts {
        recipient: caps.get(1).map(|m| clean_token(m.as_str())),
        bank: caps.get(2).map(|m| m.as_str().to_string()),
    }
}

fn name_only(caps: &Captures<'_>) -> RecipientParts {
    RecipientParts {
        recipient: caps.get(1).map(|m| clean_token(m.as_str())),
        bank: None,
    }
}

/// Transfer-reference schemes in cascade order. The interbank and
/// peer-to-peer schemes come before the bare transfer markers because their
/// descriptions begin with the same "TO TRANSFER"/"BY TRANSFER" prefixes.
fn schemes() -> [(&'static str, &'static Regex, SchemeHandler); 6] {
    [
        ("neft", &NEFT_SCHEME, bank_then_name),
        ("upi-with-bank", &UPI_BANK_SCHEME, name_then_bank),
        ("upi", &UPI_PLAIN_SCHEME, name_only),
        ("outgoing-transfer", &OUTGOING_SCHEME, name_only),
        ("incoming-transfer", &INCOMING_SCHEME, name_only),
        ("atm-withdrawal", &ATM_SCHEME, name_only),
    ]
}

/// Extract counterparty tokens from a description. First scheme wins; no
/// match yields empty parts.
pub fn extract_recipient(description: &str) -> RecipientParts {
    for (name, regex, handler) in schemes() {
        if let Some(caps) = regex.captures(description) {
            let parts = handler(&caps);
            if parts.recipient.is_some() || parts.bank.is_some() {
                debug!("recipient scheme {name} matched");
                return parts;
            }
        }
    }
    RecipientParts::default()
}

fn clean_token(raw: &str) -> String {
    raw.trim()
        .trim_matches(['-', '*', '/', '.', ' '])
        .to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_neft_with_bank_code() {
        let parts = extract_recipient("TO TRANSFER-NEFT-SBIN0001234-RAKESH KUMAR--");
        assert_eq!(parts.recipient.as_deref(), Some("RAKESH KUMAR"));
        assert_eq!(parts.bank.as_deref(), Some("SBIN0001234"));
    }

    #[test]
    fn test_upi_with_and_without_bank_tag() {
        let parts = extract_recipient("UPI/DR/517896432109/RAHUL SHARMA/SBIN/PAYMENT");
        assert_eq!(parts.recipient.as_deref(), Some("RAHUL SHARMA"));
        assert_eq!(parts.bank.as_deref(), Some("SBIN"));

        let parts = extract_recipient("UPI/CR/517896432109/FLOWER SHOP");
        assert_eq!(parts.recipient.as_deref(), Some("FLOWER SHOP"));
        assert_eq!(parts.bank, None);
    }

    #[test]
    fn test_outgoing_transfer_with_purpose() {
        let parts =
            extract_recipient("TO TRANSFER-MARGIN MONEY SOORAJ- TRANSFER TO 37608337103");
        assert_eq!(parts.recipient.as_deref(), Some("MARGIN MONEY SOORAJ"));
        assert_eq!(parts.bank, None);
    }

    #[test]
    fn test_incoming_transfer() {
        let parts = extract_recipient("BY TRANSFER-SALARY ACME CORP-");
        assert_eq!(parts.recipient.as_deref(), Some("SALARY ACME CORP"));
    }

    #[test]
    fn test_atm_withdrawal_location() {
        let parts = extract_recipient("ATM WDL-123456-MG ROAD BRANCH");
        assert_eq!(parts.recipient.as_deref(), Some("MG ROAD BRANCH"));
    }

    #[test]
    fn test_no_scheme_is_not_an_error() {
        let parts = extract_recipient("CHEQUE 001234 CLEARING");
        assert_eq!(parts, RecipientParts::default());
    }
}
