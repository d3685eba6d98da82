mod analytics;
mod db;
mod import;
mod logging;
mod models;
mod pipeline;
mod run;
mod ui;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let data_dir = get_data_dir()?;

    match args.len() {
        1 => {
            logging::init_file(&data_dir.join("smartfin.log"))?;
            let mut db = db::Database::open(&get_db_path(&data_dir))?;
            run::as_tui(&mut db)
        }
        2.. => {
            logging::init_stderr();
            let mut db = db::Database::open(&get_db_path(&data_dir))?;
            run::as_cli(&args, &mut db)
        }
        _ => {
            eprintln!("Usage: smartfin [command]");
            Ok(())
        }
    }
}

/// `SMARTFIN_DB` overrides the default location inside the data directory.
fn get_db_path(data_dir: &Path) -> PathBuf {
    match std::env::var_os("SMARTFIN_DB") {
        Some(p) if !p.is_empty() => PathBuf::from(p),
        _ => data_dir.join("smartfin.db"),
    }
}

fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "smartfin", "SmartFin")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
