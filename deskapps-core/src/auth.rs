//! Credential check for the login form.
//!
//! Passwords live in the `users` table in plaintext and are compared by exact
//! equality. This matches the data the login form was built against; it is
//! not safe for real accounts.

use rusqlite::{Connection, ErrorCode, OptionalExtension, params};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// Look up a user by exact username and password.
///
/// Returns `Ok(None)` when no row matches. Blank input is rejected without
/// running the query.
pub fn check_credentials(conn: &Connection, username: &str, password: &str) -> StoreResult<Option<User>> {
    if username.is_empty() || password.is_empty() {
        return Err(StoreError::validation("credentials", "Please enter username and password"));
    }

    let user = conn
        .query_row(
            "SELECT id, username FROM users WHERE username = ?1 AND password = ?2",
            params![username, password],
            |row| Ok(User { id: row.get(0)?, username: row.get(1)? }),
        )
        .optional()?;

    tracing::debug!(username, matched = user.is_some(), "credential check");
    Ok(user)
}

/// Insert a new user row.
pub fn add_user(conn: &Connection, username: &str, password: &str) -> StoreResult<User> {
    let username = username.trim();
    if username.is_empty() {
        return Err(StoreError::validation("username", "Username cannot be empty"));
    }
    if password.is_empty() {
        return Err(StoreError::validation("password", "Password cannot be empty"));
    }

    match conn.execute("INSERT INTO users (username, password) VALUES (?1, ?2)", params![username, password]) {
        Ok(_) => Ok(User { id: conn.last_insert_rowid(), username: username.to_string() }),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
            Err(StoreError::Duplicate(username.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
