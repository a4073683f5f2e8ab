//! Error taxonomy shared by the persistence layer and the menu.
//!
//! `NotFound` and `Integrity` come straight out of the data access functions.
//! `Menu` and `Record` only exist at the menu boundary, where they are printed
//! and the loop keeps going. Everything else is fatal.

use std::io;

use thiserror::Error;

/// Result type alias for shlist operations.
pub type Result<T> = std::result::Result<T, ShlistError>;

#[derive(Debug, Error)]
pub enum ShlistError {
    /// A referenced list or item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A foreign-key or other constraint rejected a write.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// The menu selection is not one of the offered actions.
    #[error("invalid option #{0}")]
    Menu(String),

    /// A handler was given a list or item reference it could not resolve.
    #[error("{0}")]
    Record(String),

    /// A column value could not be converted to the requested type.
    #[error("Decode error in column `{column}`: {reason}")]
    Decode { column: String, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Standard input was closed while a value was expected.
    #[error("end of input")]
    EndOfInput,
}

impl ShlistError {
    /// Translate a failed record lookup into a `Record` error so the menu can
    /// report it and continue. Other kinds pass through untouched.
    pub fn into_record_error(self) -> Self {
        match self {
            ShlistError::NotFound(what) => ShlistError::Record(format!("invalid {what}")),
            ShlistError::Integrity(what) => ShlistError::Record(format!("invalid {what}")),
            other => other,
        }
    }

    /// Whether the menu loop reports this error and keeps running.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ShlistError::Menu(_) | ShlistError::Record(_))
    }
}
