mod bofa;
mod chase;
mod clean;
mod columns;
mod detect;
mod error;
mod sniff;

pub use detect::BankFormat;
pub(crate) use detect::detect_bank_format;
pub use error::{NormalizeError, ParseError};

use tracing::info;

use crate::models::NormalizedStatement;

/// Detect the bank behind `bytes` and run its normalizer.
pub(crate) fn normalize(bytes: &[u8]) -> Result<NormalizedStatement, NormalizeError> {
    let bank = detect_bank_format(bytes)?;
    let transactions = (bank.normalizer())(bytes)?;
    info!("normalized {} {bank} transaction(s)", transactions.len());
    Ok(NormalizedStatement::new(bank, transactions))
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
