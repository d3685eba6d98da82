use std::borrow::Cow;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use super::ParseError;

const UTF8_BOM: &str = "\u{feff}";

/// Largest magnitude a money field may have: ten digits before the point.
const AMOUNT_LIMIT: i64 = 10_000_000_000;

/// Decode raw upload bytes to text. Invalid UTF-8 becomes U+FFFD and a
/// leading byte-order mark is dropped; this never fails.
pub(crate) fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    match String::from_utf8_lossy(bytes) {
        Cow::Borrowed(s) => Cow::Borrowed(s.strip_prefix(UTF8_BOM).unwrap_or(s)),
        Cow::Owned(s) => match s.strip_prefix(UTF8_BOM) {
            Some(rest) => Cow::Owned(rest.to_string()),
            None => Cow::Owned(s),
        },
    }
}

/// Parse a money field such as `$1,234.56` or `-50.00CR`.
///
/// Strips `,` and `$` and the bank's `CR`/`DR` markers (case-sensitive).
/// The markers carry no sign; the sign comes from the text itself.
/// Values of 10^10 or more in magnitude are rejected as out of range.
pub(crate) fn clean_amount(raw: &str) -> Result<Decimal, ParseError> {
    let cleaned = strip_markers(raw);
    if cleaned.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut dec =
        Decimal::from_str(&cleaned).map_err(|_| ParseError::InvalidNumber(raw.to_string()))?;
    if dec.abs() >= Decimal::new(AMOUNT_LIMIT, 0) {
        return Err(ParseError::OutOfRange(raw.to_string()));
    }
    if dec.scale() > 2 {
        dec = dec.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    }
    dec.rescale(2);
    Ok(dec)
}

/// Like [`clean_amount`], but a blank or unreadable balance is simply absent.
pub(crate) fn clean_balance(raw: &str) -> Option<Decimal> {
    match clean_amount(raw) {
        Ok(d) => Some(d),
        Err(ParseError::Empty) => None,
        Err(e) => {
            debug!("ignoring balance: {e}");
            None
        }
    }
}

/// Parse a date with the bank's format, falling back to common formats.
pub(crate) fn parse_date(raw: &str, fmt: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
        return Some(d);
    }
    for fallback in &["%m/%d/%Y", "%Y-%m-%d", "%m-%d-%Y", "%m/%d/%y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fallback) {
            return Some(d);
        }
    }
    debug!("unparsable date '{s}'");
    None
}

fn strip_markers(raw: &str) -> String {
    raw.replace([',', '$'], "")
        .replace("CR", "")
        .replace("DR", "")
        .trim()
        .to_string()
}

#[cfg(test)]
#[path = "clean_tests.rs"]
mod tests;
