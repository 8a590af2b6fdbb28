//! Recipient standardization and spending categorization.
//!
//! Both are ordered substring lookups over configuration tables; first match
//! wins, so table order changes outcomes and is covered by tests.

use crate::statement::tables::PatternTables;

/// Map a raw counterparty token to its canonical display name. Unmatched
/// recipients pass through verbatim (already cleaned by the extractor).
pub fn standardize_recipient(tables: &PatternTables, raw: &str) -> String {
    let key = raw.to_uppercase();
    for entry in &tables.synonyms {
        if entry.patterns.iter().any(|p| key.contains(p.as_str())) {
            return entry.canonical.clone();
        }
    }
    raw.to_string()
}

/// Assign a spending category. The lookup key is the standardized recipient
/// when one exists, otherwise the raw description; misses get the table's
/// default category, so the result is always non-empty.
pub fn categorize(tables: &PatternTables, recipient: Option<&str>, description: &str) -> String {
    let key = recipient.unwrap_or(description).to_uppercase();
    for entry in &tables.categories {
        if entry.patterns.iter().any(|p| key.contains(p.as_str())) {
            return entry.category.clone();
        }
    }
    tables.default_category.clone()
}
