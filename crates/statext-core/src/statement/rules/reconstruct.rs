//! Line reconstruction: turn wrapped/fragmented physical lines into one
//! logical line per transaction.
//!
//! Extraction garbles layout two ways at once: a single transaction can wrap
//! across several physical lines, and a single physical line can carry two or
//! more concatenated transactions. Reconstruction walks the transaction
//! section with an explicit accumulator state machine and never fails; lines
//! that cannot be attached to a transaction are dropped. False negatives are
//! preferred over corrupting a transaction record.

use tracing::debug;

use super::patterns::{
    adjust_date_boundary, AMOUNT_TOKEN, BOILERPLATE, COMPLETE_TXN, DATE_ONLY, DATE_TOKEN,
    LEADING_DATE, TXN_HEADER,
};

/// Accumulator state while walking the transaction section.
enum State {
    Idle,
    Accumulating(String),
}

/// Reconstruct candidate lines from normalized physical lines. Output order
/// is input order.
pub fn reconstruct(lines: &[String]) -> Vec<String> {
    let Some(start) = section_start(lines) else {
        debug!("no transaction header or date-leading line found");
        return Vec::new();
    };

    let mut candidates = Vec::new();
    let mut state = State::Idle;

    for line in &lines[start..] {
        if is_boilerplate(line) {
            debug!("skipping boilerplate line: {line}");
            continue;
        }

        state = match state {
            State::Idle => {
                if LEADING_DATE.is_match(line) {
                    open(line.clone(), &mut candidates)
                } else {
                    debug!("dropping unattached line: {line}");
                    State::Idle
                }
            }
            State::Accumulating(mut candidate) => {
                if LEADING_DATE.is_match(line) {
                    // A new dated line closes the previous candidate
                    flush(candidate, &mut candidates);
                    open(line.clone(), &mut candidates)
                } else {
                    candidate.push(' ');
                    candidate.push_str(line);
                    if COMPLETE_TXN.is_match(&candidate) {
                        flush(candidate, &mut candidates);
                        State::Idle
                    } else {
                        State::Accumulating(candidate)
                    }
                }
            }
        };
    }

    if let State::Accumulating(candidate) = state {
        flush(candidate, &mut candidates);
    }

    candidates
}

/// Start of the transaction section: the line after the debit/credit/balance
/// column header, or the first date-leading line when no header exists.
fn section_start(lines: &[String]) -> Option<usize> {
    if let Some(idx) = lines.iter().position(|l| TXN_HEADER.is_match(l)) {
        return Some(idx + 1);
    }
    lines.iter().position(|l| LEADING_DATE.is_match(l))
}

fn is_boilerplate(line: &str) -> bool {
    BOILERPLATE.is_match(line) || TXN_HEADER.is_match(line)
}

/// Open a candidate from a date-leading line; lines that already end in an
/// amount/balance pair close immediately.
fn open(line: String, candidates: &mut Vec<String>) -> State {
    if COMPLETE_TXN.is_match(&line) {
        flush(line, candidates);
        State::Idle
    } else {
        State::Accumulating(line)
    }
}

/// Close a candidate: split concatenated transactions and drop date-only
/// fragments.
fn flush(candidate: String, candidates: &mut Vec<String>) {
    for segment in split_concatenated(&candidate) {
        let segment = segment.trim().to_string();
        if DATE_ONLY.is_match(&segment) {
            debug!("discarding date-only fragment: {segment}");
            continue;
        }
        candidates.push(segment);
    }
}

/// Slice a line holding several transactions into per-transaction segments.
///
/// Date tokens are grouped in pairs (transaction date + value date); each
/// segment runs from one pair's start to the next pair's start. Only applies
/// when more than one pair is present; segments without an amount-looking
/// token are dropped.
fn split_concatenated(line: &str) -> Vec<String> {
    let starts: Vec<usize> = DATE_TOKEN
        .find_iter(line)
        .map(|m| adjust_date_boundary(line, m.start()))
        .collect();
    let pair_starts: Vec<usize> = starts.chunks(2).map(|pair| pair[0]).collect();

    if pair_starts.len() <= 1 {
        return vec![line.to_string()];
    }

    let mut segments = Vec::with_capacity(pair_starts.len());
    for (i, &begin) in pair_starts.iter().enumerate() {
        let end = pair_starts.get(i + 1).copied().unwrap_or(line.len());
        let segment = &line[begin..end];
        if AMOUNT_TOKEN.is_match(segment) {
            segments.push(segment.to_string());
        } else {
            debug!("discarding segment without amount token: {segment}");
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::statement::rules::normalize::normalize_lines;

    fn candidates(text: &str) -> Vec<String> {
        reconstruct(&normalize_lines(text))
    }

    #[test]
    fn test_merges_wrapped_transaction() {
        let out = candidates(
            "Txn Date Value Date Description Debit Credit Balance\n\
             1 JUL 2025 1 JUL 2025 TO TRANSFER-MARGIN MONEY\n\
             SOORAJ- TRANSFER TO 37608337103\n\
             4,894.00 8,308.14",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("1 JUL 2025 1 JUL 2025 TO TRANSFER"));
        assert!(out[0].ends_with("4,894.00 8,308.14"));
    }

    #[test]
    fn test_splits_concatenated_transactions() {
        let out = candidates(
            "1 JUL 2025 1 JUL 2025 TO TRANSFER-A- 100.00 1,000.002 JUL 2025 2 JUL 2025 BY TRANSFER-B- 200.00 1,200.00",
        );
        assert_eq!(out.len(), 2);
        assert!(out[0].starts_with("1 JUL 2025"));
        assert!(out[0].ends_with("100.00 1,000.00"));
        assert!(out[1].starts_with("2 JUL 2025"));
    }

    #[test]
    fn test_discards_date_only_fragment() {
        let out = candidates("3 AUG 2025");
        assert!(out.is_empty());
    }

    #[test]
    fn test_new_date_line_closes_previous_candidate() {
        let out = candidates(
            "1 JUL 2025 1 JUL 2025 BY TRANSFER-X- 50.00 1,050.00\n\
             2 JUL 2025 2 JUL 2025 TO TRANSFER-Y- 25.00 1,025.00",
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_skips_boilerplate_inside_section() {
        let out = candidates(
            "Debit Credit Balance\n\
             1 JUL 2025 1 JUL 2025 BY TRANSFER-X-\n\
             This is a computer generated statement\n\
             50.00 1,050.00",
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].ends_with("50.00 1,050.00"));
        assert!(!out[0].contains("COMPUTER"));
    }

    #[test]
    fn test_no_section_yields_nothing() {
        let out = candidates("Dear customer, welcome.\nNothing to see here.");
        assert!(out.is_empty());
    }
}
