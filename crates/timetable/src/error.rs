//! Error types for the timetable store and its form parsing.

use rusqlite::ErrorCode;
use thiserror::Error;

/// The resource that made a proposed schedule entry collide with an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Room,
    Teacher,
}

impl std::fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictKind::Room => write!(f, "The room is already occupied at this time"),
            ConflictKind::Teacher => write!(f, "The teacher is already busy at this time"),
        }
    }
}

/// Errors that can occur while reading or writing timetable records.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A submitted form field is missing or has the wrong shape
    #[error("Invalid value for '{field}': {message}")]
    Validation { field: &'static str, message: String },

    /// No record with this id exists
    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: i64 },

    /// The proposed schedule entry double-books a room or a teacher
    #[error("{0}")]
    Conflict(ConflictKind),

    /// A UNIQUE or FOREIGN KEY constraint rejected the write
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// The record is still referenced by schedule entries and cannot be deleted
    #[error("{kind} #{id} is still used by the schedule")]
    InUse { kind: &'static str, id: i64 },

    /// The database could not be reached or failed to run the statement
    #[error("Database unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Returns true if the error was caused by the submitted data rather than the store.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, StoreError::Unavailable(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::ConstraintViolation) => StoreError::Integrity(err.to_string()),
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
