//! Rule-based stages of the statement parsing pipeline.

pub mod categorize;
pub mod classify;
pub mod fields;
pub mod metadata;
pub mod normalize;
pub mod patterns;
pub mod recipient;
pub mod reconstruct;

pub use categorize::{categorize, standardize_recipient};
pub use classify::classify;
pub use fields::{format_grouped, parse_amount, parse_candidate, ParsedFields};
pub use metadata::{detect_metadata, StatementMetadata};
pub use normalize::{normalize_lines, normalize_text};
pub use recipient::{extract_recipient, RecipientParts};
pub use reconstruct::reconstruct;
