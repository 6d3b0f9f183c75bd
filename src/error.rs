//! Error Handling Infrastructure
//!
//! This module defines all error types used throughout the crate.
//! All errors are structured and map to stable error codes for logging.
//!
//! # Error Categories
//! - `NoConnection`: the startup connection attempt failed earlier; every
//!   gateway operation is a guarded no-op reporting this error
//! - `ConnectionFailed`: the single connection attempt at startup failed
//! - `Validation`: a record failed client-side validation before any call
//! - `DuplicateDocumento`: the database rejected an insert because the
//!   documento_id already exists
//! - `Database`: any other database-layer failure
//! - `Config`: configuration file errors
//! - `InvalidInput`: malformed console input (e.g. a non-integer id)
//! - `Unexpected`: anything uncategorized

use thiserror::Error;

/// Client-side validation failures, distinguished by field
///
/// These are checked before any database call is made. Callers branch on the
/// variant; messages are never meant to be string-matched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// documento_id is empty or blank after trimming
    #[error("documento_id must not be blank")]
    DocumentoVacio,

    /// fecha_nacimiento does not parse as a YYYY-MM-DD calendar date
    #[error("fecha_nacimiento must be a YYYY-MM-DD calendar date, got '{0}'")]
    FechaInvalida(String),

    /// email is present but does not match the local@domain.tld shape
    #[error("email does not match local@domain.tld: '{0}'")]
    EmailInvalido(String),
}

/// Main error type for all operations
#[derive(Error, Debug)]
pub enum CatequesisError {
    /// No connection is held; the process runs in degraded mode
    #[error("no database connection available")]
    NoConnection,

    /// The startup connection attempt failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// A record failed validation before any database call
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The database reported a uniqueness violation on documento_id
    #[error("duplicate documento_id: {0}")]
    DuplicateDocumento(String),

    /// Any other database-layer failure
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error (file not found, invalid JSON, etc.)
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed input from the console
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Anything that does not fit a category above
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl CatequesisError {
    /// Convert error to a stable code string for logs
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NoConnection => "NO_CONNECTION",
            Self::ConnectionFailed(_) => "CONNECTION_FAILED",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::DuplicateDocumento(_) => "DUPLICATE_DOCUMENTO",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Unexpected(_) => "UNEXPECTED",
        }
    }

    /// Get the human-readable error message
    ///
    /// Safe to log: credentials never appear in error messages.
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Create a connection failed error
    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::ConnectionFailed(message.into())
    }

    /// Create a duplicate documento error
    pub fn duplicate_documento(documento_id: impl Into<String>) -> Self {
        Self::DuplicateDocumento(documento_id.into())
    }

    /// Create a database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }
}

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, CatequesisError>;
