#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::TxnType;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

const CHECKING: &str = "\
Details,Posting Date,Description,Amount,Type,Balance,Check or Slip #
DEBIT,01/02/2024,\"STARBUCKS STORE 123   \",-5.75,DEBIT_CARD,1994.25,,
CREDIT,01/15/2024,\"ACME PAYROLL PPD ID: 123\",2500.00,ACH_CREDIT,4494.25,,
DEBIT,02/01/2024,\"ONLINE TRANSFER TO SAV\",-1000.00,ACCT_XFER,3494.25,,
";

const CREDIT_CARD: &str = "\
Transaction Date,Post Date,Description,Category,Type,Amount,Memo
01/03/2024,01/04/2024,AMAZON MKTPLACE,Shopping,Sale,-23.99,
01/20/2024,01/21/2024,Payment Thank You-Mobile,,Payment,500.00,
";

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

// ── Layouts ───────────────────────────────────────────────────

#[test]
fn test_chase_checking() {
    let txns = normalize(CHECKING.as_bytes()).unwrap();
    assert_eq!(txns.len(), 3);

    assert_eq!(txns[0].date(), date(2024, 1, 2));
    assert_eq!(txns[0].description(), "STARBUCKS STORE 123");
    assert_eq!(txns[0].amount(), Some(dec!(-5.75)));
    assert_eq!(txns[0].txn_type(), TxnType::Debit);
    assert_eq!(txns[0].balance(), Some(dec!(1994.25)));

    assert_eq!(txns[1].txn_type(), TxnType::Credit);
    assert_eq!(txns[1].amount(), Some(dec!(2500.00)));
}

#[test]
fn test_chase_credit_card_has_no_balance() {
    let txns = normalize(CREDIT_CARD.as_bytes()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].date(), date(2024, 1, 3));
    assert_eq!(txns[0].amount(), Some(dec!(-23.99)));
    assert!(txns.iter().all(|t| t.balance().is_none()));
    assert_eq!(txns[1].txn_type(), TxnType::Credit);
}

#[test]
fn test_chase_semicolon_delimited() {
    let csv = "Posting Date;Description;Amount;Balance\n01/02/2024;\"GROCER, INC\";\"-1,050.10\";\"2,000.00\"\n";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].description(), "GROCER, INC");
    assert_eq!(txns[0].amount(), Some(dec!(-1050.10)));
    assert_eq!(txns[0].balance(), Some(dec!(2000.00)));
}

#[test]
fn test_chase_tab_delimited_with_padded_headers() {
    let csv = " Posting Date \t Description \t Amount \n01/02/2024\tCAFE\t-3.00\n";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].date(), date(2024, 1, 2));
    assert_eq!(txns[0].amount(), Some(dec!(-3.00)));
}

// ── Misalignment ──────────────────────────────────────────────

#[test]
fn test_chase_realigns_shifted_columns() {
    // Header names a leading "Details" column the rows don't have.
    let csv = "\
Details,Posting Date,Description,Amount,Type,Balance,Check or Slip #
01/02/2024,ATM WITHDRAWAL,-100.00,MISC_DEBIT,900.00,,
01/09/2024,CASH DEPOSIT,250.00,MISC_CREDIT,1150.00,,
";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].date(), date(2024, 1, 2));
    assert_eq!(txns[0].description(), "ATM WITHDRAWAL");
    assert_eq!(txns[0].amount(), Some(dec!(-100.00)));
    assert_eq!(txns[0].balance(), Some(dec!(900.00)));
    assert_eq!(txns[1].txn_type(), TxnType::Credit);
}

#[test]
fn test_chase_realigned_headers_cut_to_width() {
    // Five header names over four-field rows; the Balance column stays empty.
    let csv = "\
Details,Posting Date,Description,Amount,Type
01/02/2024,ATM,-100.00,MISC_DEBIT
01/05/2024,BRANCH DEPOSIT,40.00,MISC_CREDIT
";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 2);
    assert_eq!(txns[0].date(), date(2024, 1, 2));
    assert_eq!(txns[0].description(), "ATM");
    assert_eq!(txns[0].amount(), Some(dec!(-100.00)));
    assert_eq!(txns[0].txn_type(), TxnType::Debit);
    assert_eq!(txns[1].description(), "BRANCH DEPOSIT");
    assert_eq!(txns[1].amount(), Some(dec!(40.00)));
    assert!(txns.iter().all(|t| t.balance().is_none()));
}

#[test]
fn test_is_misaligned_needs_both_signals() {
    let headers: Vec<String> = ["Posting Date", "Description", "Amount"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let aligned = StringRecord::from(vec!["01/02/2024", "X", "-1.00"]);
    let no_date = StringRecord::from(vec!["DEBIT", "X", "MISC_DEBIT"]);
    let shifted = StringRecord::from(vec!["01/02/2024", "X", "MISC_DEBIT"]);
    assert!(!is_misaligned(&headers, &aligned));
    assert!(!is_misaligned(&headers, &no_date));
    assert!(is_misaligned(&headers, &shifted));
}

// ── Row policy ────────────────────────────────────────────────

#[test]
fn test_chase_drops_rows_without_amount() {
    let csv = "\
Posting Date,Description,Amount
01/02/2024,GOOD,-1.00
01/03/2024,BLANK,
01/04/2024,TEXT,N/A
01/05/2024,ALSO GOOD,2.00
";
    let txns = normalize(csv.as_bytes()).unwrap();
    let descs: Vec<&str> = txns.iter().map(|t| t.description()).collect();
    assert_eq!(descs, vec!["GOOD", "ALSO GOOD"]);
}

#[test]
fn test_chase_all_rows_dropped_is_empty_not_error() {
    let csv = "Posting Date,Description,Amount\n01/02/2024,X,\n";
    assert!(normalize(csv.as_bytes()).unwrap().is_empty());
}

#[test]
fn test_chase_drops_out_of_range_amount() {
    let csv = "\
Posting Date,Description,Amount
01/02/2024,HUGE,79228162514264337593543950335
01/03/2024,NORMAL,-12.00
";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].description(), "NORMAL");
}

#[test]
fn test_chase_strips_markers() {
    let csv = "Posting Date,Description,Amount,Balance\n01/02/2024,REFUND,\"$1,200.00CR\",\"$3,000.00\"\n";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns[0].amount(), Some(dec!(1200.00)));
    assert_eq!(txns[0].balance(), Some(dec!(3000.00)));
}

#[test]
fn test_chase_bad_date_kept_as_absent() {
    let csv = "Posting Date,Description,Amount\npending,HOLD,-9.99\n";
    let txns = normalize(csv.as_bytes()).unwrap();
    assert_eq!(txns.len(), 1);
    assert_eq!(txns[0].date(), None);
}

#[test]
fn test_chase_credit_iff_positive() {
    for txn in normalize(CHECKING.as_bytes()).unwrap() {
        assert_eq!(txn.txn_type() == TxnType::Credit, txn.is_income());
    }
}

// ── Failures ──────────────────────────────────────────────────

#[test]
fn test_chase_missing_description() {
    let csv = "Posting Date,Memo,Amount\n01/02/2024,X,1.00\n";
    let err = normalize(csv.as_bytes()).unwrap_err();
    assert!(matches!(
        &err,
        NormalizeError::MissingColumn { column, .. } if column == "Description"
    ));
    assert_eq!(
        err.to_string(),
        "Could not find Description column in Chase CSV"
    );
}

#[test]
fn test_chase_missing_amount() {
    let csv = "Posting Date,Description,Debit\n01/02/2024,X,1.00\n";
    assert!(matches!(
        normalize(csv.as_bytes()),
        Err(NormalizeError::MissingColumn { .. })
    ));
}

#[test]
fn test_chase_header_only() {
    let csv = "Posting Date,Description,Amount\n";
    assert!(matches!(
        normalize(csv.as_bytes()),
        Err(NormalizeError::NoDataRows { bank: "Chase" })
    ));
}
