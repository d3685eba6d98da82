use thiserror::Error;

/// Per-field cleaning failure. Each normalizer decides whether this nulls
/// the field or drops the row.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty value")]
    Empty,
    #[error("invalid number: '{0}'")]
    InvalidNumber(String),
    #[error("amount out of range: '{0}'")]
    OutOfRange(String),
}

/// Fatal normalization failure. The message is shown to the user as-is.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("Unknown bank format.")]
    UnknownFormat,
    #[error("Could not find {column} column in {bank} CSV")]
    MissingColumn { bank: &'static str, column: String },
    #[error("Could not find the transaction header in {bank} CSV")]
    MissingHeader { bank: &'static str },
    #[error("No transactions found in {bank} CSV")]
    NoDataRows { bank: &'static str },
    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}
