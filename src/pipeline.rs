use tracing::info;

use crate::analytics::analyze;
use crate::import::{normalize, NormalizeError};
use crate::models::{NormalizedStatement, UploadSummary};

/// Run an uploaded file through detection, normalization and analytics.
///
/// Returns the normalized statement alongside the summary so callers can
/// show the rows too. Nothing is persisted here.
pub(crate) fn process_upload(
    bytes: &[u8],
) -> Result<(NormalizedStatement, UploadSummary), NormalizeError> {
    let statement = normalize(bytes)?;
    let result = analyze(&statement);
    info!(
        bank = statement.bank_name(),
        rows = statement.len(),
        months = result.months.len(),
        flag = result.risk_flag.as_str(),
        "analyzed upload"
    );

    let summary = UploadSummary {
        bank_name: statement.bank_name().to_string(),
        total_income: result.total_income,
        total_expense: result.total_expense,
        avg_monthly_income: result.avg_monthly_income,
        avg_monthly_expense: result.avg_monthly_expense,
        risk_flag: result.risk_flag,
        months: result.months,
        transaction_count: result.transaction_count,
    };
    Ok((statement, summary))
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
