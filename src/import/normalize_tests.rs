#![allow(clippy::unwrap_used)]

use super::*;
use crate::models::TxnType;

const BOFA: &str = "\
Description,,Summary Amt.
Beginning balance as of 03/01/2024,,\"500.00\"

Date,Description,Amount,Running Bal.
03/01/2024,Beginning balance as of 03/01/2024,,\"500.00\"
03/04/2024,\"DEPOSIT\",\"1,000.00\",\"1,500.00\"
";

const CHASE: &str = "\
Details,Posting Date,Description,Amount,Type,Balance,Check or Slip #
DEBIT,03/02/2024,\"GROCERY\",-80.00,DEBIT_CARD,420.00,,
";

// ── Dispatch ──────────────────────────────────────────────────

#[test]
fn test_normalize_dispatches_bofa() {
    let stmt = normalize(BOFA.as_bytes()).unwrap();
    assert_eq!(stmt.bank, BankFormat::BofA);
    assert_eq!(stmt.bank_name(), "BoFA");
    assert_eq!(stmt.len(), 2);
}

#[test]
fn test_normalize_dispatches_chase() {
    let stmt = normalize(CHASE.as_bytes()).unwrap();
    assert_eq!(stmt.bank, BankFormat::Chase);
    assert_eq!(stmt.transactions[0].txn_type(), TxnType::Debit);
}

#[test]
fn test_normalize_unknown_format() {
    let err = normalize(b"Date,Payee,Amount\n01/01/2024,X,1.00\n").unwrap_err();
    assert_eq!(err.to_string(), "Unknown bank format.");
}

#[test]
fn test_normalize_is_deterministic() {
    assert_eq!(
        normalize(CHASE.as_bytes()).unwrap(),
        normalize(CHASE.as_bytes()).unwrap()
    );
}

#[test]
fn test_normalizer_table_matches_format() {
    let rows = (BankFormat::BofA.normalizer())(BOFA.as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert!((BankFormat::Chase.normalizer())(BOFA.as_bytes()).is_err());
}
