#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::TxnType;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

const STATEMENT: &str = "\
Description,,Summary Amt.
Beginning balance as of 01/01/2024,,\"1,000.00\"
Total credits,,\"2,500.00\"
Total debits,,\"-1,204.50\"
Ending balance as of 02/29/2024,,\"2,295.50\"

Date,Description,Amount,Running Bal.
01/01/2024,Beginning balance as of 01/01/2024,,\"1,000.00\"
01/05/2024,\"PAYROLL ACME INC DES:DIR DEP \",\"2,500.00\",\"3,500.00\"
01/10/2024,\"COFFEE SHOP\",\"-4.50\",\"3,495.50\"
02/03/2024,\"RENT\",\"-1,200.00\",\"2,295.50\"
";

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

// ── normalize ─────────────────────────────────────────────────

#[test]
fn test_bofa_skips_preamble() {
    let txns = normalize(STATEMENT.as_bytes()).unwrap();
    assert_eq!(txns.len(), 4);
    assert_eq!(
        txns[0].description(),
        "Beginning balance as of 01/01/2024"
    );
}

#[test]
fn test_bofa_canonical_fields() {
    let txns = normalize(STATEMENT.as_bytes()).unwrap();
    let payroll = &txns[1];
    assert_eq!(payroll.date(), date(2024, 1, 5));
    assert_eq!(payroll.description(), "PAYROLL ACME INC DES:DIR DEP");
    assert_eq!(payroll.txn_type(), TxnType::Credit);
    assert_eq!(payroll.amount(), Some(dec!(2500.00)));
    assert_eq!(payroll.balance(), Some(dec!(3500.00)));

    let rent = &txns[3];
    assert_eq!(rent.txn_type(), TxnType::Debit);
    assert_eq!(rent.amount(), Some(dec!(-1200.00)));
    assert_eq!(rent.balance(), Some(dec!(2295.50)));
}

#[test]
fn test_bofa_blank_amount_kept_as_absent() {
    let txns = normalize(STATEMENT.as_bytes()).unwrap();
    let opening = &txns[0];
    assert_eq!(opening.amount(), None);
    assert_eq!(opening.txn_type(), TxnType::Debit);
    assert_eq!(opening.balance(), Some(dec!(1000.00)));
}

#[test]
fn test_bofa_bad_amount_nulled_not_dropped() {
    let csv = "Date,Description,Amount,Running Bal.\n01/02/2024,WEIRD,abc,10.00\n01/03/2024,OK,5.00,15.00\n";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].amount(), None);
    assert_eq!(txns[1].amount(), Some(dec!(5.00)));
}

#[test]
fn test_bofa_out_of_range_amount_nulled() {
    let csv = "Date,Description,Amount,Running Bal.\n01/02/2024,HUGE,\"75,000,000,000,000,000,000,000,000,000\",10.00\n";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount(), None);
    assert_eq!(txns[0].balance(), Some(dec!(10.00)));
}

#[test]
fn test_bofa_bad_date_is_absent() {
    let csv = "Date,Description,Amount,Running Bal.\nsoon,DEPOSIT,5.00,\n";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns[0].date(), None);
    assert_eq!(txns[0].balance(), None);
    assert_eq!(txns[0].amount(), Some(dec!(5.00)));
}

#[test]
fn test_bofa_short_row_tolerated() {
    let csv = "Date,Description,Amount,Running Bal.\n01/02/2024,TRUNCATED\n";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount(), None);
    assert_eq!(txns[0].balance(), None);
}

#[test]
fn test_bofa_credit_iff_positive() {
    for txn in normalize(STATEMENT.as_bytes()).unwrap() {
        assert_eq!(txn.txn_type() == TxnType::Credit, txn.is_income());
    }
}

#[test]
fn test_bofa_missing_header_fails_fast() {
    let csv = "Date,Description,Amount\n01/02/2024,X,1.00\n";
    let err = normalize(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, NormalizeError::MissingHeader { bank: "BoFA" }));
}

#[test]
fn test_bofa_header_only_has_no_rows() {
    let csv = "Date,Description,Amount,Running Bal.\n";
    assert!(matches!(
        normalize(csv.as_bytes()),
        Err(NormalizeError::NoDataRows { .. })
    ));
}

#[test]
fn test_bofa_crlf_line_endings() {
    let csv = "Summary\r\n\r\nDate,Description,Amount,Running Bal.\r\n01/02/2024,CASH,-20.00,80.00\r\n";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].amount(), Some(dec!(-20.00)));
}
