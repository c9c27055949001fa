use thiserror::Error;

/// Failures of the local database backed apps (contacts, login).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Input rejected before the database was touched.
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    #[error("No contact with id {0}")]
    NotFound(i64),

    #[error("User '{0}' already exists")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Could not create database directory: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn validation(field: &'static str, message: &'static str) -> Self {
        StoreError::Validation { field, message }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation { .. })
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
