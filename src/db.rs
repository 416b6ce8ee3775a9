use std::path::Path;

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use crate::error::Result;
use crate::models::normalize_category;

pub const DB_FILE_NAME: &str = "expenses.db";

// AUTOINCREMENT keeps deleted ids from being handed out again.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount REAL NOT NULL,
    category TEXT NOT NULL,
    date TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT ''
);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            // An unusable parent surfaces below as an SQLite open failure.
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), error = %e, "could not create database directory");
            }
        }
    }
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    register_functions(&conn)?;
    Ok(conn)
}

pub fn get_memory_connection() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    register_functions(&conn)?;
    Ok(conn)
}

/// `fold_case(text)` lowercases with Rust's Unicode rules; SQLite's `LOWER`
/// only folds ASCII.
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text = ctx.get::<String>(0)?;
            Ok(normalize_category(&text))
        },
    )?;
    Ok(())
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_table() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(tables, vec!["expenses".to_string()]);
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        conn.execute(
            "INSERT INTO expenses (amount, category, date) VALUES (1.0, 'food', '2024-01-01')",
            [],
        )
        .unwrap();
        init_db(&conn).unwrap();
        let count: i64 = conn.query_row("SELECT count(*) FROM expenses", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_fold_case_handles_non_ascii() {
        let (_dir, conn) = test_db();
        let folded: String = conn
            .query_row("SELECT fold_case('CAFÉ Über')", [], |r| r.get(0))
            .unwrap();
        assert_eq!(folded, "café über");
    }

    #[test]
    fn test_get_connection_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join(DB_FILE_NAME);
        get_connection(&path).unwrap();
        assert!(path.exists());
    }
}
