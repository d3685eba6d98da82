//! Chase checking and credit card exports.
//!
//! Chase files come comma-, semicolon- or tab-separated, and checking exports
//! are sometimes shifted by one column relative to their header row. Rows
//! whose amount cannot be read are dropped.

use csv::StringRecord;
use tracing::{debug, warn};

use super::clean::{clean_amount, clean_balance, decode_lossy, parse_date};
use super::columns::{col_index, field, require_col};
use super::sniff::sniff_delimiter;
use super::{BankFormat, NormalizeError};
use crate::models::Transaction;

/// Leading bytes handed to the delimiter sniffer.
pub(crate) const SNIFF_WINDOW: usize = 2048;

/// Column names used when the file's own header can't be trusted.
const REALIGNED_HEADERS: [&str; 7] = [
    "Posting Date",
    "Description",
    "Amount",
    "Type",
    "Balance",
    "Extra1",
    "Extra2",
];

const DATE_ALIASES: [&str; 2] = ["Posting Date", "Transaction Date"];

pub(crate) fn normalize(bytes: &[u8]) -> Result<Vec<Transaction>, NormalizeError> {
    let bank = BankFormat::Chase;

    let sample = decode_lossy(&bytes[..bytes.len().min(SNIFF_WINDOW)]);
    let delimiter = sniff_delimiter(&sample).unwrap_or(b',');
    debug!("{bank} delimiter {:?}", delimiter as char);

    let text = decode_lossy(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut headers: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();
    let rows = rdr.records().collect::<Result<Vec<StringRecord>, _>>()?;

    let Some(first) = rows.first() else {
        return Err(NormalizeError::NoDataRows { bank: bank.name() });
    };
    if is_misaligned(&headers, first) {
        warn!("{bank} header does not line up with its rows; using positional columns");
        headers = REALIGNED_HEADERS
            .iter()
            .take(headers.len())
            .map(|h| h.to_string())
            .collect();
    }

    if let Some(i) = headers.iter().position(|h| DATE_ALIASES.contains(&h.as_str())) {
        headers[i] = "Date".into();
    }

    let desc_col = require_col(&headers, "Description", bank.name())?;
    let amount_col = require_col(&headers, "Amount", bank.name())?;
    let date_col = require_col(&headers, "Date", bank.name())?;
    let balance_col = col_index(&headers, "Balance");

    let mut transactions = Vec::with_capacity(rows.len());
    let mut dropped = 0usize;
    for (i, record) in rows.iter().enumerate() {
        let amount = match clean_amount(field(record, amount_col)) {
            Ok(a) => a,
            Err(e) => {
                debug!("row {}: dropped: {e}", i + 1);
                dropped += 1;
                continue;
            }
        };

        transactions.push(Transaction::new(
            parse_date(field(record, date_col), bank.date_format()),
            field(record, desc_col),
            Some(amount),
            balance_col.and_then(|c| clean_balance(field(record, c))),
        ));
    }

    if dropped > 0 {
        debug!("{bank}: dropped {dropped} of {} row(s) without a usable amount", rows.len());
    }
    if transactions.is_empty() {
        warn!("{bank}: every row was dropped");
    }
    Ok(transactions)
}

/// A date in the first column together with a transaction-type code such as
/// `MISC_DEBIT` under "Amount" means the data is shifted against the header.
fn is_misaligned(headers: &[String], first: &StringRecord) -> bool {
    let starts_with_date = first.get(0).is_some_and(|v| v.trim().contains('/'));
    let type_under_amount = col_index(headers, "Amount")
        .and_then(|i| first.get(i))
        .is_some_and(|v| v.contains("MISC"));
    starts_with_date && type_under_amount
}

#[cfg(test)]
#[path = "chase_tests.rs"]
mod tests;
