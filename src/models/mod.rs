mod statement;
mod summary;
mod transaction;

pub use statement::NormalizedStatement;
pub use summary::{MonthlyTotals, RiskFlag, SummaryRecord, UploadSummary};
pub use transaction::{Transaction, TxnType};
