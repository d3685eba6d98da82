use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Direction of a normalized row. Always derived from the amount sign,
/// never read from the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnType {
    Credit,
    Debit,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }

    /// Positive amounts are credits; zero and missing amounts are debits.
    pub fn from_amount(amount: Option<Decimal>) -> Self {
        match amount {
            Some(a) if a > Decimal::ZERO => Self::Credit,
            _ => Self::Debit,
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row in the canonical schema: Date, Description, Type, Amount, Balance.
///
/// Fields are private so the type can only be built through [`Transaction::new`],
/// which keeps `txn_type` in step with `amount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    date: Option<NaiveDate>,
    description: String,
    txn_type: TxnType,
    amount: Option<Decimal>,
    balance: Option<Decimal>,
}

impl Transaction {
    pub fn new(
        date: Option<NaiveDate>,
        description: &str,
        amount: Option<Decimal>,
        balance: Option<Decimal>,
    ) -> Self {
        Self {
            date,
            description: description.trim().to_string(),
            txn_type: TxnType::from_amount(amount),
            amount,
            balance,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn txn_type(&self) -> TxnType {
        self.txn_type
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    pub fn balance(&self) -> Option<Decimal> {
        self.balance
    }

    pub fn is_income(&self) -> bool {
        self.amount.is_some_and(|a| a > Decimal::ZERO)
    }

    pub fn is_expense(&self) -> bool {
        self.amount.is_some_and(|a| a < Decimal::ZERO)
    }

    pub fn abs_amount(&self) -> Option<Decimal> {
        self.amount.map(|a| a.abs())
    }
}
