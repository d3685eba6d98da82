#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::{RiskFlag, TxnType};

const BOFA_QUARTER: &str = "\
Description,,Summary Amt.
Beginning balance as of 01/01/2024,,\"1,000.00\"
Total credits,,\"6,000.00\"
Total debits,,\"-4,350.00\"
Ending balance as of 03/31/2024,,\"2,650.00\"

Date,Description,Amount,Running Bal.
01/01/2024,Beginning balance as of 01/01/2024,,\"1,000.00\"
01/05/2024,PAYROLL,\"2,000.00\",\"3,000.00\"
01/07/2024,RENT,\"-1,400.00\",\"1,600.00\"
02/05/2024,PAYROLL,\"2,000.00\",\"3,600.00\"
02/07/2024,RENT,\"-1,400.00\",\"2,200.00\"
03/05/2024,PAYROLL,\"2,000.00\",\"4,200.00\"
03/07/2024,RENT,\"-1,400.00\",\"2,800.00\"
03/20/2024,GROCERIES,\"-150.00\",\"2,650.00\"
";

const CHASE_OVERSPEND: &str = "\
Details,Posting Date,Description,Amount,Type,Balance,Check or Slip #
CREDIT,04/01/2024,SIDE GIG,100.00,ACH_CREDIT,600.00,,
DEBIT,04/03/2024,TV,-450.00,DEBIT_CARD,150.00,,
DEBIT,05/03/2024,CAR REPAIR,-250.00,DEBIT_CARD,-100.00,,
";

const CHASE_NO_INCOME: &str = "\
Transaction Date,Post Date,Description,Category,Type,Amount,Memo
06/01/2024,06/02/2024,COFFEE,Food & Drink,Sale,-50.00,
";

// ── End to end ────────────────────────────────────────────────

#[test]
fn test_bofa_quarter_stable() {
    let (stmt, summary) = process_upload(BOFA_QUARTER.as_bytes()).unwrap();
    assert_eq!(stmt.len(), 8);
    assert_eq!(summary.bank_name, "BoFA");
    assert_eq!(summary.total_income, dec!(6000.00));
    assert_eq!(summary.total_expense, dec!(4350.00));
    assert_eq!(summary.avg_monthly_income, dec!(2000.00));
    assert_eq!(summary.avg_monthly_expense, dec!(1450.00));
    assert_eq!(summary.risk_flag, RiskFlag::Stable);
    assert_eq!(summary.months.len(), 3);
    // Beginning balance row has no amount.
    assert_eq!(summary.transaction_count, 7);
}

#[test]
fn test_chase_high_risk() {
    let (_, summary) = process_upload(CHASE_OVERSPEND.as_bytes()).unwrap();
    assert_eq!(summary.bank_name, "Chase");
    assert_eq!(summary.total_income, dec!(100.00));
    assert_eq!(summary.total_expense, dec!(700.00));
    assert_eq!(summary.avg_monthly_income, dec!(100.00));
    assert_eq!(summary.avg_monthly_expense, dec!(350.00));
    assert_eq!(summary.risk_flag, RiskFlag::HighRisk);
}

#[test]
fn test_chase_no_income() {
    let (_, summary) = process_upload(CHASE_NO_INCOME.as_bytes()).unwrap();
    assert_eq!(summary.total_income, Decimal::ZERO);
    assert_eq!(summary.risk_flag, RiskFlag::NoIncomeDetected);
}

#[test]
fn test_every_row_type_matches_sign() {
    for csv in [BOFA_QUARTER, CHASE_OVERSPEND, CHASE_NO_INCOME] {
        let (stmt, _) = process_upload(csv.as_bytes()).unwrap();
        for t in &stmt.transactions {
            let positive = t.amount().is_some_and(|a| a > Decimal::ZERO);
            assert_eq!(positive, t.txn_type() == TxnType::Credit);
        }
    }
}

#[test]
fn test_pipeline_idempotent() {
    let first = process_upload(BOFA_QUARTER.as_bytes()).unwrap();
    let second = process_upload(BOFA_QUARTER.as_bytes()).unwrap();
    assert_eq!(first, second);
}

// ── Failures ──────────────────────────────────────────────────

#[test]
fn test_unknown_format_message() {
    let err = process_upload(b"Foo,Bar\n1,2\n").unwrap_err();
    assert!(err.to_string().contains("Unknown bank format"));
}

#[test]
fn test_oversized_amounts_are_dropped_not_summed() {
    let csv = "\
Posting Date,Description,Amount
01/02/2024,A,79228162514264337593543950335
01/03/2024,B,79228162514264337593543950335
01/04/2024,C,-20.00
";
    let (statement, summary) = process_upload(csv.as_bytes()).unwrap();
    assert_eq!(statement.len(), 1);
    assert_eq!(summary.total_income, Decimal::ZERO);
    assert_eq!(summary.total_expense, dec!(20.00));
    assert_eq!(summary.risk_flag, RiskFlag::NoIncomeDetected);
}

#[test]
fn test_single_oversized_amount_leaves_empty_summary() {
    let csv = "Posting Date,Description,Amount\n01/02/2024,A,75000000000000000000000000000\n";
    let (statement, summary) = process_upload(csv.as_bytes()).unwrap();
    assert!(statement.is_empty());
    assert_eq!(summary.total_income, Decimal::ZERO);
    assert_eq!(summary.risk_flag, RiskFlag::Stable);
}

#[test]
fn test_missing_description_message() {
    let err = process_upload(b"Posting Date,Memo,Amount\n01/02/2024,X,1.00\n").unwrap_err();
    assert!(err.to_string().contains("Description"));
}
