use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::json;
use std::path::Path;

use crate::db::Database;
use crate::models::{NormalizedStatement, RiskFlag, SummaryRecord, UploadSummary};
use crate::pipeline::process_upload;
use crate::ui::util::{format_amount, format_opt_amount, truncate};

pub(crate) fn as_cli(args: &[String], db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "upload" | "u" => cli_upload(&args[2..], db),
        "inspect" | "i" => cli_inspect(&args[2..]),
        "history" => cli_history(db),
        "show" => cli_show(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("smartfin {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("SmartFin — bank statement summaries in the terminal");
    println!();
    println!("Usage: smartfin [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  upload <file.csv>             Analyze a statement and save its summary");
    println!("    --json                      Print the summary as JSON");
    println!("    --dry-run                   Analyze without saving");
    println!("  inspect <file.csv>            Show the normalized transactions");
    println!("  history                       List saved summaries");
    println!("  show <id>                     Show one saved summary");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Supported formats: Chase (checking, credit card), Bank of America checking");
}

fn read_statement(args: &[String], usage: &str) -> Result<(String, Vec<u8>)> {
    let file_path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    let path = Path::new(file_path);
    if !path.exists() {
        anyhow::bail!("File not found: {file_path}");
    }
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {file_path}"))?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.clone());
    Ok((filename, bytes))
}

fn cli_upload(args: &[String], db: &mut Database) -> Result<()> {
    let (filename, bytes) =
        read_statement(args, "smartfin upload <file.csv> [--json] [--dry-run]")?;
    let as_json = args.iter().any(|a| a == "--json");
    let dry_run = args.iter().any(|a| a == "--dry-run");

    let summary = match process_upload(&bytes) {
        Ok((_, summary)) => summary,
        Err(e) => {
            if as_json {
                println!("{}", json!({ "error": e.to_string() }));
            }
            return Err(e.into());
        }
    };

    let id = if dry_run {
        None
    } else {
        db.insert_summary(&filename, &summary)?.id
    };

    if as_json {
        println!("{}", upload_json(&summary, id));
    } else {
        print_card(&filename, &summary.bank_name, &CardFigures::from(&summary));
        if !summary.months.is_empty() {
            println!();
            print_months(&summary);
        }
        match id {
            Some(id) => println!("\nSaved as #{id}"),
            None => println!("\nDry run: nothing saved"),
        }
    }
    Ok(())
}

fn cli_inspect(args: &[String]) -> Result<()> {
    let (filename, bytes) = read_statement(args, "smartfin inspect <file.csv>")?;
    let (statement, summary) = process_upload(&bytes)?;

    println!("{filename}: {} format, {} rows", statement.bank_name(), statement.len());
    println!();
    if statement.is_empty() {
        println!("No rows with a usable amount");
        return Ok(());
    }
    print_transactions(&statement);
    if !summary.months.is_empty() {
        println!();
        print_months(&summary);
    }
    Ok(())
}

fn cli_history(db: &mut Database) -> Result<()> {
    let summaries = db.get_summaries()?;
    if summaries.is_empty() {
        println!("No uploads yet");
        return Ok(());
    }

    println!(
        "{:<5} {:<17} {:<24} {:<6} {:>14} {:>14}  Flag",
        "ID", "Uploaded", "File", "Bank", "Income", "Expense"
    );
    println!("{}", "─".repeat(100));
    for s in &summaries {
        println!(
            "{:<5} {:<17} {:<24} {:<6} {:>14} {:>14}  {}",
            s.id.unwrap_or(0),
            short_timestamp(&s.uploaded_at),
            truncate(&s.filename, 24),
            s.bank_name,
            format_amount(s.total_income),
            format_amount(s.total_expense),
            s.risk_flag,
        );
    }
    Ok(())
}

fn cli_show(args: &[String], db: &mut Database) -> Result<()> {
    let id: i64 = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: smartfin show <id>"))?
        .parse()
        .context("Summary id must be a number")?;
    let record = db
        .get_summary_by_id(id)?
        .ok_or_else(|| anyhow::anyhow!("Summary #{id} not found"))?;

    print_card(&record.filename, &record.bank_name, &CardFigures::from(&record));
    println!("\nUploaded {}", short_timestamp(&record.uploaded_at));
    Ok(())
}

// ── Output ────────────────────────────────────────────────────

/// The figures every summary card shows, from either a fresh upload or a
/// stored record.
struct CardFigures {
    total_income: Decimal,
    total_expense: Decimal,
    avg_monthly_income: Decimal,
    avg_monthly_expense: Decimal,
    risk_flag: RiskFlag,
}

impl From<&UploadSummary> for CardFigures {
    fn from(s: &UploadSummary) -> Self {
        Self {
            total_income: s.total_income,
            total_expense: s.total_expense,
            avg_monthly_income: s.avg_monthly_income,
            avg_monthly_expense: s.avg_monthly_expense,
            risk_flag: s.risk_flag,
        }
    }
}

impl From<&SummaryRecord> for CardFigures {
    fn from(s: &SummaryRecord) -> Self {
        Self {
            total_income: s.total_income,
            total_expense: s.total_expense,
            avg_monthly_income: s.avg_monthly_income,
            avg_monthly_expense: s.avg_monthly_expense,
            risk_flag: s.risk_flag,
        }
    }
}

fn print_card(filename: &str, bank: &str, c: &CardFigures) {
    println!("SmartFin — {filename} ({bank})");
    println!("{}", "─".repeat(40));
    println!("  Total Income:     {}", format_amount(c.total_income));
    println!("  Total Expense:    {}", format_amount(c.total_expense));
    println!("  Avg Monthly Inc:  {}", format_amount(c.avg_monthly_income));
    println!("  Avg Monthly Exp:  {}", format_amount(c.avg_monthly_expense));
    println!("  Risk:             {}", c.risk_flag);
}

fn print_months(summary: &UploadSummary) {
    println!("{:<8} {:>14} {:>14}", "Month", "Income", "Expense");
    for m in &summary.months {
        println!(
            "{:<8} {:>14} {:>14}",
            m.label(),
            format_amount(m.income),
            format_amount(m.expense)
        );
    }
}

fn print_transactions(statement: &NormalizedStatement) {
    println!(
        "{:<10}  {:<40} {:<6} {:>14} {:>14}",
        "Date", "Description", "Type", "Amount", "Balance"
    );
    println!("{}", "─".repeat(90));
    for t in &statement.transactions {
        let date = t
            .date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "{:<10}  {:<40} {:<6} {:>14} {:>14}",
            date,
            truncate(t.description(), 40),
            t.txn_type(),
            format_opt_amount(t.amount()),
            format_opt_amount(t.balance()),
        );
    }
}

/// The upload response object: money as JSON numbers, `id` null when nothing
/// was saved.
fn upload_json(summary: &UploadSummary, id: Option<i64>) -> serde_json::Value {
    let num = |d: Decimal| d.to_f64().unwrap_or(0.0);
    json!({
        "bank": summary.bank_name,
        "id": id,
        "total_income": num(summary.total_income),
        "total_expense": num(summary.total_expense),
        "avg_monthly_income": num(summary.avg_monthly_income),
        "avg_monthly_expense": num(summary.avg_monthly_expense),
        "flag": summary.risk_flag.as_str(),
    })
}

/// `2024-03-05T14:02:11.123456Z` → `2024-03-05 14:02`.
fn short_timestamp(rfc3339: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| rfc3339.to_string())
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
