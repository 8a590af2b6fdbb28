//! Ordered pattern tables: bank identities, spending categories, recipient
//! synonyms.
//!
//! Every lookup is first-match-wins in table order, so the order of entries
//! (and of patterns within an entry) is part of the behavioral contract.
//! The built-in defaults cover the common cases; real deployments swap in
//! their own tables via configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::statement::BankIdentity;

/// One bank identity with the text fragments that identify it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankPattern {
    pub bank: BankIdentity,
    pub patterns: Vec<String>,
}

/// One spending category with the text fragments that select it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPattern {
    pub category: String,
    pub patterns: Vec<String>,
}

/// One canonical counterparty name with the raw fragments that map to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synonym {
    pub canonical: String,
    pub patterns: Vec<String>,
}

/// The full set of tables consumed by the pipeline. Read-only at parse time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternTables {
    pub banks: Vec<BankPattern>,
    pub categories: Vec<CategoryPattern>,
    pub synonyms: Vec<Synonym>,

    /// Category assigned when nothing in `categories` matches.
    pub default_category: String,
}

impl PatternTables {
    /// Load tables from a JSON file, preserving entry order.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let tables = serde_json::from_str(&data)?;
        Ok(tables)
    }

    /// Resolve a bank identity from uppercased text; first table entry with a
    /// substring match wins.
    pub fn bank_of(&self, text: &str) -> BankIdentity {
        for entry in &self.banks {
            if entry.patterns.iter().any(|p| text.contains(p.as_str())) {
                return entry.bank;
            }
        }
        BankIdentity::Unknown
    }
}

fn bank(bank: BankIdentity, patterns: &[&str]) -> BankPattern {
    BankPattern {
        bank,
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

fn category(category: &str, patterns: &[&str]) -> CategoryPattern {
    CategoryPattern {
        category: category.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

fn synonym(canonical: &str, patterns: &[&str]) -> Synonym {
    Synonym {
        canonical: canonical.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

impl Default for PatternTables {
    fn default() -> Self {
        Self {
            // Name fragments plus IFSC prefixes and UPI handles, so the same
            // table resolves both statement headers and transfer-reference
            // bank tokens.
            banks: vec![
                bank(BankIdentity::Sbi, &["STATE BANK OF INDIA", "SBIN", "OKSBI"]),
                bank(BankIdentity::Hdfc, &["HDFC BANK", "HDFC", "OKHDFCBANK"]),
                bank(BankIdentity::Icici, &["ICICI BANK", "ICIC", "OKICICI"]),
                bank(BankIdentity::Axis, &["AXIS BANK", "UTIB", "OKAXIS"]),
                bank(BankIdentity::Kotak, &["KOTAK MAHINDRA", "KKBK"]),
                bank(BankIdentity::Pnb, &["PUNJAB NATIONAL BANK", "PUNB"]),
                bank(BankIdentity::BankOfBaroda, &["BANK OF BARODA", "BARB"]),
                bank(BankIdentity::Canara, &["CANARA BANK", "CNRB"]),
                bank(BankIdentity::UnionBank, &["UNION BANK", "UBIN"]),
                bank(BankIdentity::Idbi, &["IDBI BANK", "IBKL"]),
                bank(BankIdentity::YesBank, &["YES BANK", "YESB", "YBL"]),
                bank(BankIdentity::IndusInd, &["INDUSIND", "INDB"]),
            ],
            categories: vec![
                category("Food", &["SWIGGY", "ZOMATO", "DOMINO", "MCDONALD", "KFC"]),
                category(
                    "Groceries",
                    &["BIGBASKET", "BLINKIT", "ZEPTO", "DMART", "GROFERS"],
                ),
                category(
                    "Transport",
                    &["UBER", "OLA", "RAPIDO", "IRCTC", "REDBUS", "PETROL", "FUEL"],
                ),
                category(
                    "Shopping",
                    &["AMAZON", "FLIPKART", "MYNTRA", "AJIO", "MEESHO"],
                ),
                category(
                    "Entertainment",
                    &["NETFLIX", "HOTSTAR", "SPOTIFY", "PRIME VIDEO", "BOOKMYSHOW"],
                ),
                category(
                    "Utilities",
                    &["ELECTRICITY", "AIRTEL", "JIO", "VODAFONE", "BROADBAND", "RECHARGE"],
                ),
                category("Rent", &["RENT", "NOBROKER"]),
                category(
                    "Investments",
                    &["MARGIN MONEY", "ZERODHA", "GROWW", "UPSTOX", "MUTUAL FUND", "SIP"],
                ),
                category("Cash", &["ATM", "CASH WITHDRAWAL"]),
                category("Income", &["SALARY", "INTEREST", "DIVIDEND"]),
                category("Fees", &["CHARGES", "CHRG", "GST", "AMC"]),
            ],
            synonyms: vec![
                synonym("Margin Money Deposit", &["MARGIN MONEY", "MARGIN"]),
                synonym("Amazon", &["AMAZON", "AMZN"]),
                synonym("Swiggy", &["SWIGGY"]),
                synonym("Zerodha Broking", &["ZERODHA"]),
                synonym("Indian Railways", &["IRCTC"]),
                synonym("ATM Cash", &["ATM"]),
            ],
            default_category: "Personal".to_string(),
        }
    }
}
