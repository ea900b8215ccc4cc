//! Error types for the storage layer.

use notes_core::NoteId;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Another note already holds this title.
    #[error("duplicate note title: {0}")]
    DuplicateTitle(String),

    /// Note vanished between being read and being written back.
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),

    /// The store refused to persist the record as given.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// Migration error.
    #[error("migration error: {0}")]
    MigrationError(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl StoreError {
    /// Whether the error is a uniqueness rejection on the note title.
    pub fn is_duplicate_title(&self) -> bool {
        matches!(self, Self::DuplicateTitle(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_title_is_recognised() {
        assert!(StoreError::DuplicateTitle("a".into()).is_duplicate_title());
        assert!(!StoreError::InvalidRecord("a".into()).is_duplicate_title());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = StoreError::DuplicateTitle("Groceries".into());
        assert_eq!(err.to_string(), "duplicate note title: Groceries");
    }
}
