//! SQLite connection helper shared by the login and contact book apps.

use std::{fs, path::Path};

use rusqlite::Connection;

use crate::error::StoreResult;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    phone TEXT,
    email TEXT
);
"#;

/// Open (or create) the database file at `path` and make sure both tables exist.
pub fn open(path: &Path) -> StoreResult<Connection> {
    if let Some(parent) = path.parent() {
        // Connection::open reports a missing directory as a generic CANTOPEN.
        fs::create_dir_all(parent)?;
    }

    tracing::debug!(path = %path.display(), "opening database");
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

pub fn open_in_memory() -> StoreResult<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
            .unwrap();
        let names = stmt.query_map([], |row| row.get::<_, String>(0)).unwrap().map(|r| r.unwrap()).collect();
        names
    }

    #[test]
    fn in_memory_has_both_tables() {
        let conn = open_in_memory().unwrap();
        assert_eq!(table_names(&conn), vec!["contacts", "users"]);
    }

    #[test]
    fn reopening_a_file_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("apps.sqlite");

        {
            let conn = open(&path).unwrap();
            conn.execute("INSERT INTO contacts (name) VALUES ('Ada')", []).unwrap();
        }

        let conn = open(&path).unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn unusable_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let err = open(&blocker.join("apps.sqlite")).unwrap_err();
        assert!(matches!(err, crate::StoreError::Io(_)));
        assert!(err.to_string().starts_with("Could not create database directory"));
    }
}
