use csv::StringRecord;

use super::NormalizeError;

pub(crate) fn col_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Like [`col_index`], but a missing column is a fatal error for `bank`.
pub(crate) fn require_col(
    headers: &[String],
    name: &str,
    bank: &'static str,
) -> Result<usize, NormalizeError> {
    col_index(headers, name).ok_or_else(|| NormalizeError::MissingColumn {
        bank,
        column: name.to_string(),
    })
}

/// Field at `idx`, or empty when a short row doesn't reach that column.
pub(crate) fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or_default()
}
