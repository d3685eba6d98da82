use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{MonthlyTotals, NormalizedStatement, RiskFlag};

/// Expense above income by more than this factor (1.1) is high risk.
fn high_risk_ratio() -> Decimal {
    Decimal::new(11, 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct AnalyticsResult {
    pub(crate) total_income: Decimal,
    /// Magnitude of all debits.
    pub(crate) total_expense: Decimal,
    pub(crate) avg_monthly_income: Decimal,
    pub(crate) avg_monthly_expense: Decimal,
    pub(crate) risk_flag: RiskFlag,
    /// Chronological; only dated rows contribute.
    pub(crate) months: Vec<MonthlyTotals>,
    /// Rows that carried an amount.
    pub(crate) transaction_count: usize,
}

/// Totals, monthly averages and risk flag for a statement.
///
/// Rows without an amount are ignored. Rows without a date still count
/// toward the totals but not toward any month.
pub(crate) fn analyze(statement: &NormalizedStatement) -> AnalyticsResult {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    let mut transaction_count = 0;
    let mut by_month: BTreeMap<(i32, u32), (Decimal, Decimal)> = BTreeMap::new();

    for txn in &statement.transactions {
        let Some(magnitude) = txn.abs_amount() else {
            continue;
        };
        transaction_count += 1;

        let (income, expense) = if txn.is_income() {
            (magnitude, Decimal::ZERO)
        } else {
            (Decimal::ZERO, magnitude)
        };
        total_income += income;
        total_expense += expense;

        if let Some(date) = txn.date() {
            let entry = by_month
                .entry((date.year(), date.month()))
                .or_insert((Decimal::ZERO, Decimal::ZERO));
            entry.0 += income;
            entry.1 += expense;
        }
    }

    let months: Vec<MonthlyTotals> = by_month
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlyTotals {
            year,
            month,
            income,
            expense,
        })
        .collect();

    AnalyticsResult {
        total_income,
        total_expense,
        avg_monthly_income: mean_of_nonzero(months.iter().map(|m| m.income)),
        avg_monthly_expense: mean_of_nonzero(months.iter().map(|m| m.expense)),
        risk_flag: classify_risk(total_income, total_expense),
        months,
        transaction_count,
    }
}

/// First matching rule wins: no income with spending, then expense more
/// than 110% of income, otherwise stable.
pub(crate) fn classify_risk(total_income: Decimal, total_expense: Decimal) -> RiskFlag {
    if total_income.is_zero() && total_expense > Decimal::ZERO {
        RiskFlag::NoIncomeDetected
    } else if total_expense > total_income * high_risk_ratio() {
        RiskFlag::HighRisk
    } else {
        RiskFlag::Stable
    }
}

/// Mean over the months that had any activity of this kind, to two places.
fn mean_of_nonzero(values: impl Iterator<Item = Decimal>) -> Decimal {
    let (sum, count) = values
        .filter(|v| !v.is_zero())
        .fold((Decimal::ZERO, 0u32), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        return Decimal::ZERO;
    }
    (sum / Decimal::from(count)).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
