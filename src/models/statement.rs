use crate::import::BankFormat;

use super::Transaction;

/// Output of a normalizer: the canonical rows in source order plus the
/// format they were read as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedStatement {
    pub bank: BankFormat,
    pub transactions: Vec<Transaction>,
}

impl NormalizedStatement {
    pub fn new(bank: BankFormat, transactions: Vec<Transaction>) -> Self {
        Self { bank, transactions }
    }

    pub fn bank_name(&self) -> &'static str {
        self.bank.name()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
