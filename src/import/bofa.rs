//! Bank of America checking export.
//!
//! The file opens with a short account summary block; the transaction table
//! starts at the `Date,Description,Amount,Running Bal.` header. The first row
//! is usually the "Beginning balance" line, which has no amount.

use tracing::{debug, warn};

use super::clean::{clean_amount, clean_balance, decode_lossy, parse_date};
use super::columns::{field, require_col};
use super::{BankFormat, NormalizeError};
use crate::models::Transaction;

pub(crate) const HEADER: &str = "Date,Description,Amount,Running Bal.";
const BALANCE_COLUMN: &str = "Running Bal.";

/// Normalize a BofA export. Rows with an unreadable amount are kept with the
/// amount absent; analytics skips them.
pub(crate) fn normalize(bytes: &[u8]) -> Result<Vec<Transaction>, NormalizeError> {
    let bank = BankFormat::BofA;
    let text = decode_lossy(bytes);
    let lines: Vec<&str> = text.lines().collect();

    let Some(start) = lines.iter().position(|l| l.trim().starts_with(HEADER)) else {
        warn!("{bank} file has no '{HEADER}' header line; refusing to guess the layout");
        return Err(NormalizeError::MissingHeader { bank: bank.name() });
    };
    debug!("skipping {start} preamble line(s)");

    let body = lines[start..].join("\n");
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let date_col = require_col(&headers, "Date", bank.name())?;
    let desc_col = require_col(&headers, "Description", bank.name())?;
    let amount_col = require_col(&headers, "Amount", bank.name())?;
    let balance_col = require_col(&headers, BALANCE_COLUMN, bank.name())?;

    let mut transactions = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;

        let amount = match clean_amount(field(&record, amount_col)) {
            Ok(a) => Some(a),
            Err(e) => {
                debug!("row {}: amount left empty: {e}", i + 1);
                None
            }
        };

        transactions.push(Transaction::new(
            parse_date(field(&record, date_col), bank.date_format()),
            field(&record, desc_col),
            amount,
            clean_balance(field(&record, balance_col)),
        ));
    }

    if transactions.is_empty() {
        return Err(NormalizeError::NoDataRows { bank: bank.name() });
    }
    Ok(transactions)
}

#[cfg(test)]
#[path = "bofa_tests.rs"]
mod tests;
