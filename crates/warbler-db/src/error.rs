use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors produced by the data-access layer.
#[derive(Error, Debug)]
pub enum DbError {
    /// A NOT NULL, UNIQUE, CHECK or FOREIGN KEY constraint rejected a write.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Signup was attempted without a password.
    #[error("Password must not be empty")]
    EmptyPassword,

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Database error: {0}")]
    Sqlite(rusqlite::Error),

    #[error("DB lock poisoned")]
    LockPoisoned,
}

impl DbError {
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(e, msg) if e.code == ErrorCode::ConstraintViolation => {
                DbError::Integrity(msg.unwrap_or_else(|| e.to_string()))
            }
            other => DbError::Sqlite(other),
        }
    }
}

impl From<argon2::password_hash::Error> for DbError {
    fn from(err: argon2::password_hash::Error) -> Self {
        DbError::Hash(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DbError>;
