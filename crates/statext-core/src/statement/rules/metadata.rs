//! Statement metadata detection: bank identity, statement period, account
//! fields.
//!
//! Detection is read-only over the normalized text and independent of line
//! reconstruction. Every miss is non-fatal; the pipeline carries on with
//! whatever was found.

use chrono::NaiveDate;

use crate::models::statement::{AccountInfo, BankIdentity, DateRange};
use crate::statement::tables::PatternTables;

use super::patterns::{
    ACCOUNT_NUMBER_TEMPLATES, BRANCH_TEMPLATES, CUSTOMER_NAME_TEMPLATES, DATE_TOKEN,
    IFSC_TEMPLATES, RANGE_BARE, RANGE_HYPHEN, RANGE_STATEMENT_MONTH, RANGE_STATEMENT_NUMERIC,
};

/// Metadata detected from one document.
#[derive(Debug, Clone, Default)]
pub struct StatementMetadata {
    pub bank: BankIdentity,
    pub date_range: Option<DateRange>,
    pub account_info: AccountInfo,
}

/// Detect all metadata from normalized lines.
pub fn detect_metadata(lines: &[String], tables: &PatternTables) -> StatementMetadata {
    let flat = lines.join(" ");

    StatementMetadata {
        bank: tables.bank_of(&flat),
        date_range: detect_date_range(&flat),
        account_info: detect_account_info(lines),
    }
}

/// Statement period: ordered templates, then a best-effort scan over all
/// valid date tokens in the document.
pub fn detect_date_range(text: &str) -> Option<DateRange> {
    let templates = [
        &*RANGE_STATEMENT_MONTH,
        &*RANGE_STATEMENT_NUMERIC,
        &*RANGE_BARE,
        &*RANGE_HYPHEN,
    ];

    for template in templates {
        if let Some(caps) = template.captures(text) {
            return Some(DateRange {
                from: caps[1].to_string(),
                to: caps[2].to_string(),
            });
        }
    }

    // Fallback: first and last date-looking token, validated so that stray
    // digit runs ("45/13/2025") cannot become a period boundary.
    let dates: Vec<&str> = DATE_TOKEN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|t| parse_date_token(t).is_some())
        .collect();

    if dates.len() >= 2 {
        return Some(DateRange {
            from: dates[0].to_string(),
            to: dates[dates.len() - 1].to_string(),
        });
    }

    None
}

/// Account fields, each via its own ordered template list over the lines.
pub fn detect_account_info(lines: &[String]) -> AccountInfo {
    AccountInfo {
        account_number: first_capture(lines, &ACCOUNT_NUMBER_TEMPLATES),
        customer_name: first_capture(lines, &CUSTOMER_NAME_TEMPLATES),
        branch_name: first_capture(lines, &BRANCH_TEMPLATES),
        ifsc_code: first_capture(lines, &IFSC_TEMPLATES),
    }
}

fn first_capture(lines: &[String], templates: &[regex::Regex]) -> Option<String> {
    for template in templates {
        for line in lines {
            if let Some(caps) = template.captures(line) {
                let value = caps[1].trim().to_string();
                if !value.is_empty() {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Interpret a date token. Supports "1 JUL 2025" and numeric D-M-Y forms with
/// two- or four-digit years.
pub fn parse_date_token(token: &str) -> Option<NaiveDate> {
    let token = token.trim();

    let parts: Vec<&str> = token.split(' ').collect();
    if parts.len() == 3 {
        let day: u32 = parts[0].parse().ok()?;
        let month = month_abbrev(parts[1])?;
        let year: i32 = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    let parts: Vec<&str> = token.split(['-', '/']).collect();
    if parts.len() == 3 {
        let day: u32 = parts[0].parse().ok()?;
        let month: u32 = parts[1].parse().ok()?;
        let year: i32 = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(expand_year(year), month, day);
    }

    None
}

fn month_abbrev(s: &str) -> Option<u32> {
    let month = match s {
        "JAN" => 1,
        "FEB" => 2,
        "MAR" => 3,
        "APR" => 4,
        "MAY" => 5,
        "JUN" => 6,
        "JUL" => 7,
        "AUG" => 8,
        "SEP" => 9,
        "OCT" => 10,
        "NOV" => 11,
        "DEC" => 12,
        _ => return None,
    };
    Some(month)
}

fn expand_year(year: i32) -> i32 {
    if year < 100 {
        // Two-digit year: 00-50 are 2000s, 51-99 are 1900s
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::statement::rules::normalize::normalize_lines;

    #[test]
    fn test_detect_bank_from_header() {
        let tables = PatternTables::default();
        let lines = normalize_lines("Statement of Account\nState Bank of India\nBranch: MG Road");
        let meta = detect_metadata(&lines, &tables);
        assert_eq!(meta.bank, BankIdentity::Sbi);
    }

    #[test]
    fn test_date_range_wordy_template() {
        let range =
            detect_date_range("ACCOUNT STATEMENT FROM 1 JUL 2025 TO 31 JUL 2025").unwrap();
        assert_eq!(range.from, "1 JUL 2025");
        assert_eq!(range.to, "31 JUL 2025");
    }

    #[test]
    fn test_date_range_bare_and_hyphen() {
        let range = detect_date_range("PERIOD 01-07-2025 TO 31-07-2025").unwrap();
        assert_eq!(range.from, "01-07-2025");

        let range = detect_date_range("1 JUL 2025 - 31 JUL 2025").unwrap();
        assert_eq!(range.to, "31 JUL 2025");
    }

    #[test]
    fn test_date_range_fallback_scan() {
        let range = detect_date_range("OPENED 2 JUL 2025 SOMETHING 9 JUL 2025 MORE").unwrap();
        assert_eq!(range.from, "2 JUL 2025");
        assert_eq!(range.to, "9 JUL 2025");

        assert!(detect_date_range("ONLY ONE 2 JUL 2025 HERE").is_none());
        assert!(detect_date_range("NO DATES AT ALL").is_none());
    }

    #[test]
    fn test_fallback_scan_rejects_invalid_tokens() {
        // 45/13/2025 is date-shaped but not a date
        assert!(detect_date_range("45/13/2025 AND 99/99/99").is_none());
    }

    #[test]
    fn test_account_fields_independent() {
        let lines = normalize_lines(
            "Account Name: RAKESH KUMAR\nAccount Number: 37608337103456\nIFSC: SBIN0001234",
        );
        let info = detect_account_info(&lines);
        assert_eq!(info.customer_name.as_deref(), Some("RAKESH KUMAR"));
        assert_eq!(info.account_number.as_deref(), Some("37608337103456"));
        assert_eq!(info.ifsc_code.as_deref(), Some("SBIN0001234"));
        assert!(info.branch_name.is_none());
    }

    #[test]
    fn test_parse_date_token_forms() {
        assert_eq!(
            parse_date_token("1 JUL 2025"),
            NaiveDate::from_ymd_opt(2025, 7, 1)
        );
        assert_eq!(
            parse_date_token("01-07-2025"),
            NaiveDate::from_ymd_opt(2025, 7, 1)
        );
        assert_eq!(
            parse_date_token("1/7/25"),
            NaiveDate::from_ymd_opt(2025, 7, 1)
        );
        assert_eq!(parse_date_token("45/13/2025"), None);
    }
}
