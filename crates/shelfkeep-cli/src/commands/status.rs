use anyhow::{Context, Result};
use serde::Serialize;
use shelfkeep_core::Database;
use std::path::Path;

#[derive(Debug, Serialize)]
struct Status<'a> {
    database: &'a Path,
    counts: Vec<(&'static str, i64)>,
}

pub fn show_status(db: &Database, db_path: &Path, json: bool) -> Result<()> {
    let status = Status {
        database: db_path,
        counts: db.table_counts().context("Failed to count rows")?,
    };

    super::emit(json, &status, |status| {
        println!("\nShelfkeep Status\n");
        println!("  Database: {}", status.database.display());
        for (table, count) in &status.counts {
            println!("  {table:<14} {count}");
        }
    })
}
