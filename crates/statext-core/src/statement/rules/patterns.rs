//! Common regex patterns for statement extraction.
//!
//! All patterns assume normalized input: uppercased, whitespace collapsed to
//! single spaces. Quantified sub-expressions live in the `*_SRC` fragments so
//! composed patterns can be built with `format!` without brace escaping.

use lazy_static::lazy_static;
use regex::Regex;

/// A date token: "1 JUL 2025", "01-07-2025", "1/7/25".
pub const DATE_SRC: &str = r"(?:\d{1,2} [A-Z]{3} \d{4}|\d{1,2}[-/]\d{1,2}[-/]\d{2,4})";

/// A monetary token: two decimal places, optionally comma-grouped in either
/// thousands ("4,894.00") or lakh ("1,23,456.78") style.
pub const AMOUNT_SRC: &str = r"(?:\d{1,3}(?:,\d{3})+|\d{1,2}(?:,\d{2})*,\d{3}|\d+)\.\d{2}";

lazy_static! {
    // Date tokens
    pub static ref DATE_TOKEN: Regex = Regex::new(DATE_SRC).unwrap();

    pub static ref LEADING_DATE: Regex =
        Regex::new(&format!(r"^{DATE_SRC}")).unwrap();

    pub static ref DATE_ONLY: Regex =
        Regex::new(&format!(r"^{DATE_SRC}$")).unwrap();

    // Amount tokens
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(AMOUNT_SRC).unwrap();

    /// A candidate is complete once it ends in amount-then-balance, spaced
    /// or concatenated.
    pub static ref COMPLETE_TXN: Regex =
        Regex::new(&format!(r"{AMOUNT_SRC}\s*{AMOUNT_SRC}$")).unwrap();

    /// Column-header line marking the start of the transaction section.
    pub static ref TXN_HEADER: Regex =
        Regex::new(r"DEBIT.*CREDIT.*BALANCE").unwrap();

    /// Footer/disclaimer phrases interleaved with transaction data.
    pub static ref BOILERPLATE: Regex = Regex::new(
        r"COMPUTER GENERATED|SYSTEM GENERATED|DO(?:ES)? NOT REQUIRE (?:A |ANY )?SIGNATURE|PAGE \d+ OF \d+|PLEASE QUOTE|REGISTERED OFFICE|TOLL FREE|CUSTOMER CARE|IN CASE OF ANY DISCREPANCY|AUTHORISED SIGNATORY|END OF STATEMENT"
    ).unwrap();

    // Field-parser date grammars, tried in this order (see rules::fields)
    pub static ref TWO_DATES_CONCAT: Regex =
        Regex::new(&format!(r"^({DATE_SRC})({DATE_SRC})\s*(.*)$")).unwrap();

    pub static ref TWO_DATES_SPACED: Regex =
        Regex::new(&format!(r"^({DATE_SRC})\s+({DATE_SRC})\s*(.*)$")).unwrap();

    pub static ref DATE_THEN_TEXT: Regex =
        Regex::new(&format!(r"^({DATE_SRC})\s+(\S.*)$")).unwrap();

    pub static ref DATE_CONCAT_TEXT: Regex =
        Regex::new(&format!(r"^({DATE_SRC})(\S.*)$")).unwrap();

    // Amount/balance tail grammars, tried in this order
    pub static ref INTEREST_TAIL: Regex =
        Regex::new(&format!(r"^(.*?)--\s*({AMOUNT_SRC})\s+({AMOUNT_SRC})$")).unwrap();

    pub static ref SPACED_TAIL: Regex =
        Regex::new(&format!(r"^(.*?)\s+({AMOUNT_SRC})\s+({AMOUNT_SRC})$")).unwrap();

    pub static ref CONCAT_TAIL: Regex =
        Regex::new(&format!(r"^(.*?)({AMOUNT_SRC})({AMOUNT_SRC})$")).unwrap();

    /// Long digit run used as a weak transaction identifier.
    pub static ref REFERENCE_NUMBER: Regex = Regex::new(r"\d{12,}").unwrap();

    // Transfer-reference schemes (see rules::recipient for cascade order)
    pub static ref NEFT_SCHEME: Regex = Regex::new(
        r"NEFT[*/ -]+(?:([A-Z]{4}0[A-Z0-9]{6})[*/ -]+)?([A-Z][A-Z0-9 .&]*?)(?:--|[*/-]|$)"
    ).unwrap();

    pub static ref UPI_BANK_SCHEME: Regex = Regex::new(
        r"UPI/(?:DR|CR)/\d+/([A-Z][A-Z0-9 .&]*?)/([A-Z]{3,12})(?:/|$)"
    ).unwrap();

    pub static ref UPI_PLAIN_SCHEME: Regex = Regex::new(
        r"UPI/(?:DR|CR)/\d+/([A-Z][A-Z0-9 .&]*?)(?:/|$)"
    ).unwrap();

    pub static ref OUTGOING_SCHEME: Regex = Regex::new(
        r"TO TRANSFER[- ]+([A-Z0-9][A-Z0-9 .&]*?)(?:-|$)"
    ).unwrap();

    pub static ref INCOMING_SCHEME: Regex = Regex::new(
        r"BY TRANSFER[- ]+([A-Z0-9][A-Z0-9 .&]*?)(?:-|$)"
    ).unwrap();

    pub static ref ATM_SCHEME: Regex = Regex::new(
        r"ATM[ -]*(?:WDL|CASH|WITHDRAWAL)(?:[-/ ]+\d+)?(?:[-/ ]+([A-Z][A-Z0-9 .&]*))?"
    ).unwrap();

    // Statement date-range templates, tried in this order
    pub static ref RANGE_STATEMENT_MONTH: Regex = Regex::new(
        r"(?:STATEMENT|TRANSACTIONS)[A-Z() ]*?FROM (\d{1,2} [A-Z]{3} \d{4}) TO (\d{1,2} [A-Z]{3} \d{4})"
    ).unwrap();

    pub static ref RANGE_STATEMENT_NUMERIC: Regex = Regex::new(
        r"(?:STATEMENT|TRANSACTIONS)[A-Z() ]*?FROM (\d{1,2}[-/]\d{1,2}[-/]\d{2,4}) TO (\d{1,2}[-/]\d{1,2}[-/]\d{2,4})"
    ).unwrap();

    pub static ref RANGE_BARE: Regex =
        Regex::new(&format!(r"({DATE_SRC}) TO ({DATE_SRC})")).unwrap();

    pub static ref RANGE_HYPHEN: Regex =
        Regex::new(&format!(r"({DATE_SRC}) - ({DATE_SRC})")).unwrap();

    // Account-field templates; each field has its own ordered list and
    // misses are simply omitted
    pub static ref ACCOUNT_NUMBER_TEMPLATES: Vec<Regex> = vec![
        Regex::new(r"ACCOUNT (?:NUMBER|NO)[ .:]*(\d{9,18})").unwrap(),
        Regex::new(r"A/C (?:NO[ .:]*)?(\d{9,18})").unwrap(),
    ];

    pub static ref CUSTOMER_NAME_TEMPLATES: Vec<Regex> = vec![
        Regex::new(r"(?:ACCOUNT|CUSTOMER) NAME[ .:-]*([A-Z][A-Z .]*?)(?: ACCOUNT| BRANCH| IFSC| ADDRESS|$)").unwrap(),
        Regex::new(r"NAME[ .:-]*([A-Z][A-Z .]*?)(?: ACCOUNT| BRANCH| IFSC| ADDRESS|$)").unwrap(),
    ];

    pub static ref BRANCH_TEMPLATES: Vec<Regex> = vec![
        Regex::new(r"BRANCH(?: NAME)?[ .:-]*([A-Z][A-Z0-9 .]*?)(?: IFSC| MICR| ADDRESS| ACCOUNT|$)").unwrap(),
    ];

    pub static ref IFSC_TEMPLATES: Vec<Regex> = vec![
        Regex::new(r"IFSC(?: CODE)?[ .:]*([A-Z]{4}0[A-Z0-9]{6})").unwrap(),
    ];
}

/// Correct a date-token boundary that swallowed the tail of a preceding
/// amount. In "45,000.002 JUL 2025" the day digits absorb the amount's final
/// decimals, so the boundary shifts to wherever the two-decimal amount
/// completes, provided a date token still starts there.
pub fn adjust_date_boundary(line: &str, start: usize) -> usize {
    let prefix = &line[..start];
    let Some(dot) = prefix.rfind('.') else {
        return start;
    };

    let decimals = prefix.len() - dot - 1;
    if decimals >= 2 || !prefix[dot + 1..].bytes().all(|b| b.is_ascii_digit()) {
        return start;
    }

    let shifted = start + (2 - decimals);
    if shifted < line.len() && LEADING_DATE.is_match(&line[shifted..]) {
        shifted
    } else {
        start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_token_forms() {
        assert!(DATE_TOKEN.is_match("1 JUL 2025"));
        assert!(DATE_TOKEN.is_match("01-07-2025"));
        assert!(DATE_TOKEN.is_match("1/7/25"));
        assert!(!DATE_TOKEN.is_match("JULY 2025"));
    }

    #[test]
    fn test_complete_txn_spaced_and_concatenated() {
        assert!(COMPLETE_TXN.is_match("SOMETHING 4,894.00 8,308.14"));
        assert!(COMPLETE_TXN.is_match("SOMETHING 4,894.008,308.14"));
        assert!(!COMPLETE_TXN.is_match("SOMETHING 4,894.00"));
    }

    #[test]
    fn test_adjust_date_boundary_restores_decimals() {
        let line = "X 45,000.002 JUL 2025 2 JUL 2025 MORE";
        let m = DATE_TOKEN.find(line).unwrap();
        assert_eq!(&line[m.start()..m.end()], "02 JUL 2025");

        let adjusted = adjust_date_boundary(line, m.start());
        assert_eq!(&line[..adjusted], "X 45,000.00");
        assert!(LEADING_DATE.is_match(&line[adjusted..]));
    }

    #[test]
    fn test_adjust_date_boundary_leaves_clean_matches() {
        let line = "X 45,000.00 2 JUL 2025 MORE";
        let m = DATE_TOKEN.find(line).unwrap();
        assert_eq!(adjust_date_boundary(line, m.start()), m.start());
    }

    #[test]
    fn test_amount_token_lakh_grouping() {
        assert!(AMOUNT_TOKEN.is_match("1,23,456.78"));
        assert!(AMOUNT_TOKEN.is_match("12,34,567.89"));
        assert!(AMOUNT_TOKEN.is_match("4,894.00"));
    }

    #[test]
    fn test_two_dates_concat_backtracks() {
        let caps = TWO_DATES_CONCAT
            .captures("1 JUL 20251 JUL 2025 TO TRANSFER")
            .unwrap();
        assert_eq!(&caps[1], "1 JUL 2025");
        assert_eq!(&caps[2], "1 JUL 2025");
        assert_eq!(&caps[3], "TO TRANSFER");
    }

    #[test]
    fn test_spaced_tail_ignores_reference_digits() {
        let caps = SPACED_TAIL
            .captures("TRANSFER TO 37608337103 4,894.00 8,308.14")
            .unwrap();
        assert_eq!(&caps[1], "TRANSFER TO 37608337103");
        assert_eq!(&caps[2], "4,894.00");
        assert_eq!(&caps[3], "8,308.14");
    }

    #[test]
    fn test_concat_tail_splits_at_decimal() {
        let caps = CONCAT_TAIL.captures("POS PURCHASE4,894.008,308.14").unwrap();
        assert_eq!(&caps[2], "4,894.00");
        assert_eq!(&caps[3], "8,308.14");
    }

    #[test]
    fn test_neft_scheme_with_and_without_bank() {
        let caps = NEFT_SCHEME
            .captures("TO TRANSFER-NEFT-SBIN0001234-RAKESH KUMAR--")
            .unwrap();
        assert_eq!(caps.get(1).unwrap().as_str(), "SBIN0001234");
        assert_eq!(caps.get(2).unwrap().as_str(), "RAKESH KUMAR");

        let caps = NEFT_SCHEME.captures("BY TRANSFER-NEFT-ACME SUPPLIES-").unwrap();
        assert!(caps.get(1).is_none());
        assert_eq!(caps.get(2).unwrap().as_str(), "ACME SUPPLIES");
    }

    #[test]
    fn test_upi_scheme_bank_tag_optional() {
        let caps = UPI_BANK_SCHEME
            .captures("UPI/DR/123456789012/RAHUL SHARMA/SBIN/PAYMENT")
            .unwrap();
        assert_eq!(&caps[1], "RAHUL SHARMA");
        assert_eq!(&caps[2], "SBIN");

        assert!(UPI_BANK_SCHEME.captures("UPI/CR/123/FLOWER SHOP").is_none());
        let caps = UPI_PLAIN_SCHEME.captures("UPI/CR/123/FLOWER SHOP").unwrap();
        assert_eq!(&caps[1], "FLOWER SHOP");
    }
}
