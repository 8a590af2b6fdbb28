//! Per-transaction field extraction from one reconstructed candidate line.
//!
//! Both the date and the amount/balance grammars are explicit ordered lists
//! evaluated first-match-wins; table order is part of the contract.

use std::str::FromStr;

use regex::{Captures, Regex};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::config::ParsingConfig;

use super::patterns::{
    adjust_date_boundary, BOILERPLATE, CONCAT_TAIL, DATE_CONCAT_TEXT, DATE_THEN_TEXT, DATE_TOKEN,
    INTEREST_TAIL, REFERENCE_NUMBER, SPACED_TAIL, TWO_DATES_CONCAT, TWO_DATES_SPACED,
};

/// Raw fields extracted from one candidate line, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedFields {
    pub transaction_date: String,
    /// Defaults to the transaction date when the line carried only one date.
    pub value_date: String,
    pub description: String,
    pub reference_number: Option<String>,
    /// Raw matched amount text, kept for the debit/credit echo fields.
    pub amount_text: Option<String>,
    /// Unsigned magnitude; the classifier decides the sign.
    pub amount: Decimal,
    pub balance: Decimal,
}

type DateHandler = fn(&Captures<'_>) -> (String, Option<String>, String);

fn two_dates(caps: &Captures<'_>) -> (String, Option<String>, String) {
    (
        caps[1].to_string(),
        Some(caps[2].to_string()),
        caps[3].trim().to_string(),
    )
}

fn one_date(caps: &Captures<'_>) -> (String, Option<String>, String) {
    (caps[1].to_string(), None, caps[2].trim().to_string())
}

/// Date grammars in priority order.
fn date_grammars() -> [(&'static str, &'static Regex, DateHandler); 4] {
    [
        ("two-dates-concatenated", &TWO_DATES_CONCAT, two_dates),
        ("two-dates-spaced", &TWO_DATES_SPACED, two_dates),
        ("date-then-text", &DATE_THEN_TEXT, one_date),
        ("date-concatenated-text", &DATE_CONCAT_TEXT, one_date),
    ]
}

/// Amount/balance tail grammars in priority order. All capture
/// (description, amount, balance).
fn amount_grammars() -> [(&'static str, &'static Regex); 3] {
    [
        ("interest-tail", &INTEREST_TAIL),
        ("spaced-tail", &SPACED_TAIL),
        ("concatenated-tail", &CONCAT_TAIL),
    ]
}

/// Extract all fields from a candidate line. Returns `None` when the line is
/// not a transaction (no date grammar matched, or the remainder is too short
/// to be real).
pub fn parse_candidate(line: &str, config: &ParsingConfig) -> Option<ParsedFields> {
    let (transaction_date, value_date, remainder) = extract_dates(line)?;

    if remainder.len() < config.min_remainder_len {
        debug!("rejecting fragment after {transaction_date}: {remainder:?}");
        return None;
    }

    let remainder = trim_next_transaction(&remainder, config);

    let (description, amount_text, amount, balance) = extract_tail(remainder);
    let description = clean_description(&description);
    let reference_number = REFERENCE_NUMBER
        .find(&description)
        .map(|m| m.as_str().to_string());

    Some(ParsedFields {
        transaction_date,
        value_date,
        description,
        reference_number,
        amount_text,
        amount,
        balance,
    })
}

fn extract_dates(line: &str) -> Option<(String, String, String)> {
    for (name, regex, handler) in date_grammars() {
        if let Some(caps) = regex.captures(line) {
            debug!("date grammar {name} matched");
            let (first, second, rest) = handler(&caps);
            let value_date = second.unwrap_or_else(|| first.clone());
            return Some((first, value_date, rest));
        }
    }
    None
}

/// Guard against a candidate that absorbed the start of the next
/// transaction: a further date token early in the remainder marks the next
/// transaction, while one near the end is trailing footer noise.
fn trim_next_transaction<'a>(remainder: &'a str, config: &ParsingConfig) -> &'a str {
    let Some(m) = DATE_TOKEN.find(remainder) else {
        return remainder;
    };
    let start = adjust_date_boundary(remainder, m.start());

    let ratio = start as f64 / remainder.len() as f64;
    let near_boundary = (ratio - config.trailing_noise_ratio).abs() <= config.near_boundary_margin;

    if ratio < config.trailing_noise_ratio {
        if near_boundary {
            debug!(
                "near-boundary trim at {ratio:.2} (threshold {:.2}): {remainder}",
                config.trailing_noise_ratio
            );
        }
        remainder[..start].trim_end()
    } else {
        if near_boundary {
            debug!(
                "near-boundary keep at {ratio:.2} (threshold {:.2}): {remainder}",
                config.trailing_noise_ratio
            );
        }
        remainder
    }
}

/// Split the remainder into description and trailing amount/balance pair. A
/// miss is non-fatal: the whole remainder becomes the description so the
/// transaction can still be inspected downstream.
fn extract_tail(remainder: &str) -> (String, Option<String>, Decimal, Decimal) {
    for (name, regex) in amount_grammars() {
        if let Some(caps) = regex.captures(remainder) {
            debug!("amount grammar {name} matched");
            let amount_text = caps[2].to_string();
            let amount = parse_amount(&amount_text);
            let balance = parse_amount(&caps[3]);
            return (caps[1].to_string(), Some(amount_text), amount, balance);
        }
    }
    (remainder.to_string(), None, Decimal::ZERO, Decimal::ZERO)
}

fn clean_description(description: &str) -> String {
    let description = match BOILERPLATE.find(description) {
        Some(m) => &description[..m.start()],
        None => description,
    };
    description
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end_matches(['-', ' '])
        .to_string()
}

/// Total numeric parsing: strip separators, parse as fixed-point decimal;
/// anything unparseable is zero.
pub fn parse_amount(s: &str) -> Decimal {
    let cleaned = s.trim().replace(',', "");
    Decimal::from_str(&cleaned).unwrap_or(Decimal::ZERO)
}

/// Format a magnitude back into comma-grouped statement form.
pub fn format_grouped(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (int_part, dec_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    format!("{grouped}.{dec_part}")
}
