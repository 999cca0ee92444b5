//! Error taxonomy for core storage and domain logic.
//!
//! Callers branch on [`AppError::kind`], never on message text or on
//! storage-specific error values.
use thiserror::Error;

/// Closed set of error kinds every component relies on for control flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidInput,
    Conflict,
    Unauthorized,
    Forbidden,
    Internal,
}

impl ErrorKind {
    /// Stable machine-readable code for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Storage error: {0}")]
    StorageMessage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    #[error("Not found")]
    NotFound,

    #[error("Store not found")]
    StoreNotFound,

    #[error("Review not found")]
    ReviewNotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Rating must be between 1 and 5")]
    InvalidRating,

    #[error("One or more file ids do not belong to this store")]
    InvalidFileIds,

    #[error("Invalid transaction")]
    InvalidTransaction,

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// Classify this error into the stable taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::NotFound | AppError::StoreNotFound | AppError::ReviewNotFound => {
                ErrorKind::NotFound
            }
            AppError::InvalidInput(_)
            | AppError::InvalidRating
            | AppError::InvalidFileIds
            | AppError::InvalidTransaction => ErrorKind::InvalidInput,
            AppError::AlreadyExists(_) | AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::Unauthorized => ErrorKind::Unauthorized,
            AppError::Forbidden => ErrorKind::Forbidden,
            AppError::Database(_)
            | AppError::StorageMessage(_)
            | AppError::Serialization(_)
            | AppError::Internal => ErrorKind::Internal,
        }
    }

    /// Whether this error means the addressed row does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Translate an absent row into a domain not-found error at the lookup that observes it.
pub trait OptionalRowExt<T> {
    /// Map `Ok(None)` to `Err(missing)`; pass every other outcome through.
    fn or_not_found(self, missing: AppError) -> Result<T, AppError>;
}

impl<T> OptionalRowExt<T> for Result<Option<T>, AppError> {
    fn or_not_found(self, missing: AppError) -> Result<T, AppError> {
        match self {
            Ok(Some(value)) => Ok(value),
            Ok(None) => Err(missing),
            Err(err) => Err(err),
        }
    }
}

impl From<redb::DatabaseError> for AppError {
    fn from(value: redb::DatabaseError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TransactionError> for AppError {
    fn from(value: redb::TransactionError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::TableError> for AppError {
    fn from(value: redb::TableError) -> Self {
        match value {
            // A table that was never created holds no rows.
            redb::TableError::TableDoesNotExist(_) => Self::NotFound,
            other => Self::Database(other.into()),
        }
    }
}

impl From<redb::StorageError> for AppError {
    fn from(value: redb::StorageError) -> Self {
        Self::Database(value.into())
    }
}

impl From<redb::CommitError> for AppError {
    fn from(value: redb::CommitError) -> Self {
        Self::Database(value.into())
    }
}
