use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A uniqueness, primary-key or foreign-key rule rejected the write.
    #[error("constraint violation on {entity}: {message}")]
    Conflict {
        entity: &'static str,
        message: String,
    },
}

impl Error {
    /// Classify a store error raised while writing `entity`.
    ///
    /// Constraint failures become [`Error::Conflict`]; everything else stays a
    /// storage fault.
    pub(crate) fn from_write(entity: &'static str, err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == ErrorCode::ConstraintViolation =>
            {
                Self::Conflict {
                    entity,
                    message: message.unwrap_or_else(|| code.to_string()),
                }
            }
            other => Self::Database(other),
        }
    }

    /// Returns `true` when a store constraint rejected the operation.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
