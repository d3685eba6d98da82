pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS statement_summaries (
    id                  INTEGER PRIMARY KEY AUTOINCREMENT,
    uploaded_at         TEXT NOT NULL,
    filename            TEXT NOT NULL,
    bank_name           TEXT NOT NULL DEFAULT '',
    total_income        TEXT NOT NULL,
    total_expense       TEXT NOT NULL,
    avg_monthly_income  TEXT NOT NULL,
    avg_monthly_expense TEXT NOT NULL,
    risk_flag           TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_summaries_uploaded ON statement_summaries(uploaded_at);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[
    // Future migrations go here:
    // (1, "ALTER TABLE statement_summaries ADD COLUMN row_count INTEGER NOT NULL DEFAULT 0;"),
];
