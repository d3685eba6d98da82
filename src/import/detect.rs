use tracing::debug;

use super::clean::decode_lossy;
use super::{bofa, chase, NormalizeError};
use crate::models::Transaction;

/// How many leading bytes of an upload are inspected for a bank signature.
pub(crate) const DETECT_WINDOW: usize = 2000;

/// Shared normalizer contract: whole file in, canonical rows out.
pub(crate) type Normalizer = fn(&[u8]) -> Result<Vec<Transaction>, NormalizeError>;

/// Bank CSV layouts we know how to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankFormat {
    Chase,
    BofA,
}

impl BankFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chase => "Chase",
            Self::BofA => "BoFA",
        }
    }

    pub fn date_format(&self) -> &'static str {
        match self {
            Self::Chase | Self::BofA => "%m/%d/%Y",
        }
    }

    pub(crate) fn normalizer(&self) -> Normalizer {
        match self {
            Self::Chase => chase::normalize,
            Self::BofA => bofa::normalize,
        }
    }
}

impl std::fmt::Display for BankFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Known signatures, checked in order; the first match wins. A Chase export
/// that also mentions "Running Bal." is still Chase.
const SIGNATURES: &[(BankFormat, fn(&str) -> bool)] = &[
    (BankFormat::Chase, looks_like_chase),
    (BankFormat::BofA, looks_like_bofa),
];

fn looks_like_chase(header: &str) -> bool {
    header.contains("Posting Date") || header.contains("Transaction Date")
}

fn looks_like_bofa(header: &str) -> bool {
    header.contains("Running Bal.")
}

/// Classify an upload by the text in its first [`DETECT_WINDOW`] bytes.
pub(crate) fn detect_bank_format(bytes: &[u8]) -> Result<BankFormat, NormalizeError> {
    let window = &bytes[..bytes.len().min(DETECT_WINDOW)];
    let header = decode_lossy(window);

    let found = SIGNATURES
        .iter()
        .find(|(_, matches)| matches(&*header))
        .map(|(format, _)| *format);

    match found {
        Some(format) => {
            debug!("detected {format} format");
            Ok(format)
        }
        None => Err(NormalizeError::UnknownFormat),
    }
}

#[cfg(test)]
#[path = "detect_tests.rs"]
mod tests;
