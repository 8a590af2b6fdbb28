//! Text normalization for extracted statement text.
//!
//! Extraction tools emit inconsistent whitespace, zero-width characters, and
//! stray control bytes. Normalization is pure and total: uppercase, collapse
//! whitespace runs to single spaces, drop invisible separators. The
//! line-preserving mode exists because the reconstructor needs original line
//! breaks to detect wrapped continuations.

/// Zero-width and invisible separators that survive `char::is_whitespace`.
const INVISIBLE: &[char] = &['\u{200b}', '\u{200c}', '\u{200d}', '\u{2060}', '\u{feff}'];

fn clean_chars(s: &str) -> String {
    s.chars()
        .filter(|c| !INVISIBLE.contains(c) && !(c.is_control() && !c.is_whitespace()))
        .collect()
}

/// Normalize one line: uppercase, single-space separated tokens.
pub fn normalize_line(line: &str) -> String {
    clean_chars(line)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Normalize whole-document text into a single flat line.
pub fn normalize_text(text: &str) -> String {
    normalize_line(text)
}

/// Normalize while keeping original line breaks; empty lines are dropped.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(normalize_line)
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_collapses_whitespace_and_uppercases() {
        assert_eq!(
            normalize_line("  1 Jul\t2025   to  Transfer "),
            "1 JUL 2025 TO TRANSFER"
        );
    }

    #[test]
    fn test_strips_invisible_characters() {
        assert_eq!(normalize_line("A\u{200b}B\u{feff}C"), "ABC");
        assert_eq!(normalize_line("A\u{00a0}B"), "A B");
    }

    #[test]
    fn test_normalize_lines_preserves_breaks_drops_empties() {
        let lines = normalize_lines("first line\n\n  second\tline  \n");
        assert_eq!(lines, vec!["FIRST LINE".to_string(), "SECOND LINE".to_string()]);
    }

    #[test]
    fn test_normalize_text_flattens() {
        assert_eq!(normalize_text("a\nb\nc"), "A B C");
    }
}
