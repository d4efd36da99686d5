use rusqlite::Connection;
use std::path::Path;

use crate::error::Result;

use super::migrations::MIGRATIONS;

/// The store handle: one SQLite connection with the schema applied.
///
/// Repositories and services borrow the connection; the handle is created
/// once at start-up and dropped at shutdown.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path)?;
        Self::bootstrap(conn)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::bootstrap(conn)
    }

    /// Get a reference to the underlying connection.
    #[must_use]
    pub const fn conn(&self) -> &Connection {
        &self.conn
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if applied.contains(&migration.version) {
                continue;
            }
            log::info!(
                "Applying migration {} ({})",
                migration.version,
                migration.name
            );
            let tx = self.conn.unchecked_transaction()?;
            tx.execute_batch(migration.sql)?;
            tx.execute(
                "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                rusqlite::params![migration.version, migration.name],
            )?;
            tx.commit()?;
        }

        Ok(())
    }

    /// Number of rows in each collection, in schema order.
    ///
    /// Used for status reporting.
    pub fn table_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        const TABLES: &[&str] = &[
            "authors",
            "publishers",
            "genres",
            "languages",
            "books",
            "customers",
            "loans",
            "categories",
            "manufacturers",
            "products",
        ];

        let mut counts = Vec::with_capacity(TABLES.len());
        for table in TABLES {
            let count: i64 =
                self.conn
                    .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                        row.get(0)
                    })?;
            counts.push((*table, count));
        }
        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let db = Database::open_in_memory().unwrap();
        let enabled: i64 = db
            .conn()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[test]
    fn test_table_counts_on_empty_database() {
        let db = Database::open_in_memory().unwrap();
        let counts = db.table_counts().unwrap();
        assert_eq!(counts.len(), 10);
        assert!(counts.iter().all(|(_, count)| *count == 0));
    }

    #[test]
    fn test_reopen_does_not_reapply_migrations() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("shelf.db");

        drop(Database::open(&path).unwrap());
        let db = Database::open(&path).unwrap();

        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 2);
    }
}
