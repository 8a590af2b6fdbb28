//! Process command - parse a single extracted statement text file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use statext_core::models::config::StatextConfig;
use statext_core::statement::tables::PatternTables;
use statext_core::{ParsedStatement, StatementParser};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (extracted statement text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Pattern tables file (overrides tables from the config)
    #[arg(short, long)]
    tables: Option<PathBuf>,

    /// Print extraction warnings
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per transaction)
    Csv,
    /// Plain text summary
    Text,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let extension = args
        .input
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "txt" {
        anyhow::bail!(
            "Unsupported file format: {} (expected extracted .txt statement text)",
            extension
        );
    }

    info!("Processing file: {}", args.input.display());

    let text = fs::read_to_string(&args.input)?;
    let file_name = args
        .input
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("statement.txt");

    let parser = build_parser(&config, args.tables.as_deref())?;
    let outcome = parser.parse(&text, file_name)?;

    if args.show_warnings && !outcome.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &outcome.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = format_statement(&outcome.statement, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Build a parser from config, optionally overriding the pattern tables.
pub(super) fn build_parser(
    config: &StatextConfig,
    tables_path: Option<&Path>,
) -> anyhow::Result<StatementParser> {
    let tables = match tables_path {
        Some(path) => PatternTables::from_file(path)?,
        None => config.tables.clone(),
    };

    Ok(StatementParser::new()
        .with_config(config.parsing.clone())
        .with_tables(tables))
}

pub(super) fn format_statement(
    statement: &ParsedStatement,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(statement)?),
        OutputFormat::Csv => format_csv(statement),
        OutputFormat::Text => Ok(format_text(statement)),
    }
}

fn format_csv(statement: &ParsedStatement) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "transaction_date",
        "value_date",
        "description",
        "reference_number",
        "amount",
        "balance",
        "type",
        "recipient",
        "recipient_bank",
        "category",
    ])?;

    for txn in &statement.transactions {
        let record = vec![
            txn.transaction_date.clone(),
            txn.value_date.clone(),
            txn.description.clone(),
            txn.reference_number.clone().unwrap_or_default(),
            txn.amount.to_string(),
            txn.balance.to_string(),
            format!("{:?}", txn.kind).to_lowercase(),
            txn.recipient.clone().unwrap_or_default(),
            txn.recipient_bank
                .map(|b| b.to_string())
                .unwrap_or_default(),
            txn.category.clone(),
        ];
        wtr.write_record(&record)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(statement: &ParsedStatement) -> String {
    let mut output = String::new();

    output.push_str(&format!("Bank: {}\n", statement.bank));
    if let Some(range) = &statement.date_range {
        output.push_str(&format!("Period: {} to {}\n", range.from, range.to));
    }
    if let Some(account) = &statement.account_info.account_number {
        let holder = statement
            .account_info
            .customer_name
            .as_deref()
            .unwrap_or("unknown holder");
        output.push_str(&format!("Account: {} ({})\n", account, holder));
    }
    output.push_str(&format!("Transactions: {}\n\n", statement.transactions_found));

    for txn in &statement.transactions {
        output.push_str(&format!(
            "  {}  {:<8}{:>14}  {:>14}  {}\n",
            txn.transaction_date,
            format!("{:?}", txn.kind).to_lowercase(),
            txn.amount.to_string(),
            txn.balance.to_string(),
            txn.description,
        ));
    }

    output
}
