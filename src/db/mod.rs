mod schema;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{RiskFlag, SummaryRecord, UploadSummary};

const SUMMARY_COLUMNS: &str = "id, uploaded_at, filename, bank_name, total_income, total_expense,
     avg_monthly_income, avg_monthly_expense, risk_flag";

/// Store for upload summaries. Rows are only ever inserted.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        debug!("opened database {}", path.display());
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Summaries ─────────────────────────────────────────────

    /// Persist one upload. Assigns the id and upload timestamp.
    pub(crate) fn insert_summary(
        &self,
        filename: &str,
        summary: &UploadSummary,
    ) -> Result<SummaryRecord> {
        let mut record = SummaryRecord::new(filename, summary);
        self.conn
            .execute(
                "INSERT INTO statement_summaries (uploaded_at, filename, bank_name, total_income,
                     total_expense, avg_monthly_income, avg_monthly_expense, risk_flag)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.uploaded_at,
                    record.filename,
                    record.bank_name,
                    record.total_income.to_string(),
                    record.total_expense.to_string(),
                    record.avg_monthly_income.to_string(),
                    record.avg_monthly_expense.to_string(),
                    record.risk_flag.as_str(),
                ],
            )
            .context("Failed to save statement summary")?;
        let id = self.conn.last_insert_rowid();
        record.id = Some(id);
        info!(id, filename, "saved statement summary");
        Ok(record)
    }

    /// All summaries, newest first.
    pub(crate) fn get_summaries(&self) -> Result<Vec<SummaryRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SUMMARY_COLUMNS} FROM statement_summaries ORDER BY uploaded_at DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], summary_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub(crate) fn get_summary_by_id(&self, id: i64) -> Result<Option<SummaryRecord>> {
        let result = self.conn.query_row(
            &format!("SELECT {SUMMARY_COLUMNS} FROM statement_summaries WHERE id = ?1"),
            params![id],
            summary_from_row,
        );
        match result {
            Ok(s) => Ok(Some(s)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn get_summary_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM statement_summaries", [], |row| {
                row.get(0)
            })?)
    }
}

#[derive(Error, Debug)]
#[error("unknown risk flag '{0}'")]
struct UnknownRiskFlag(String);

fn summary_from_row(row: &Row<'_>) -> rusqlite::Result<SummaryRecord> {
    let flag: String = row.get(8)?;
    let risk_flag = RiskFlag::parse(&flag).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(8, Type::Text, Box::new(UnknownRiskFlag(flag)))
    })?;
    Ok(SummaryRecord {
        id: Some(row.get(0)?),
        uploaded_at: row.get(1)?,
        filename: row.get(2)?,
        bank_name: row.get(3)?,
        total_income: decimal_column(row, 4)?,
        total_expense: decimal_column(row, 5)?,
        avg_monthly_income: decimal_column(row, 6)?,
        avg_monthly_expense: decimal_column(row, 7)?,
        risk_flag,
    })
}

fn decimal_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
