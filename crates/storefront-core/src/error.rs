use thiserror::Error;

/// Application-wide error types for the storefront API.
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested row does not exist.
    #[error("Not found")]
    NotFound,

    /// Unique constraint violated (duplicate email, duplicate lookup name).
    #[error("Duplicate value violates {constraint}")]
    Duplicate { constraint: String },

    /// Referenced row is missing, or the row is still referenced elsewhere.
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Request data failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Missing, invalid, or expired credentials.
    #[error("Unauthorized")]
    Unauthorized,

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Returns true for errors that indicate a fault in the service rather
    /// than in the request. These are the ones worth a server-side log line.
    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::DatabaseError(_) | AppError::ConfigError(_))
    }
}
