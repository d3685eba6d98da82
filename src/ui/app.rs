use anyhow::Result;
use std::path::Path;
use tracing::warn;

use crate::db::Database;
use crate::models::{NormalizedStatement, SummaryRecord, UploadSummary};
use crate::pipeline::process_upload;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    History,
    Statement,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::History, Self::Statement]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::History => write!(f, "History"),
            Self::Statement => write!(f, "Statement"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    // History
    pub(crate) summaries: Vec<SummaryRecord>,
    pub(crate) summary_index: usize,
    pub(crate) summary_scroll: usize,

    // Statement (last upload of this session)
    pub(crate) statement: Option<NormalizedStatement>,
    pub(crate) last_summary: Option<UploadSummary>,
    pub(crate) last_filename: String,
    pub(crate) transaction_index: usize,
    pub(crate) transaction_scroll: usize,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::History,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,

            summaries: Vec::new(),
            summary_index: 0,
            summary_scroll: 0,

            statement: None,
            last_summary: None,
            last_filename: String::new(),
            transaction_index: 0,
            transaction_scroll: 0,

            visible_rows: 20,
        }
    }

    pub(crate) fn refresh(&mut self, db: &Database) -> Result<()> {
        self.summaries = db.get_summaries()?;
        if self.summary_index >= self.summaries.len() {
            self.summary_index = self.summaries.len().saturating_sub(1);
            self.summary_scroll = self.summary_scroll.min(self.summary_index);
        }
        Ok(())
    }

    pub(crate) fn selected_summary(&self) -> Option<&SummaryRecord> {
        self.summaries.get(self.summary_index)
    }

    /// Rows a table can show: the content area minus borders and header row.
    pub(crate) fn table_page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    pub(crate) fn transaction_len(&self) -> usize {
        self.statement.as_ref().map_or(0, NormalizedStatement::len)
    }

    /// Read a statement from disk and run it through [`App::upload_bytes`].
    pub(crate) fn upload(&mut self, path: &str, db: &Database) -> Result<()> {
        let path = Path::new(path);
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.set_status(format!("Error: cannot read {}: {e}", path.display()));
                return Ok(());
            }
        };
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.upload_bytes(&filename, &bytes, db)
    }

    /// A rejected file only changes the status line; nothing is stored and the
    /// previous statement stays on screen.
    pub(crate) fn upload_bytes(&mut self, filename: &str, bytes: &[u8], db: &Database) -> Result<()> {
        let (statement, summary) = match process_upload(bytes) {
            Ok(result) => result,
            Err(e) => {
                warn!(filename, error = %e, "upload rejected");
                self.set_status(format!("Error: {e}"));
                return Ok(());
            }
        };

        let record = db.insert_summary(filename, &summary)?;
        self.set_status(format!(
            "Saved #{}: {} statement, {} rows, {}",
            record.id.unwrap_or(0),
            summary.bank_name,
            statement.len(),
            summary.risk_flag
        ));

        self.statement = Some(statement);
        self.last_summary = Some(summary);
        self.last_filename = filename.to_string();
        self.transaction_index = 0;
        self.transaction_scroll = 0;

        self.refresh(db)?;
        self.summary_index = 0;
        self.summary_scroll = 0;
        self.screen = Screen::Statement;
        Ok(())
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
