//! Error types for forge-rs

use thiserror::Error;

/// Result type alias for forge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Forge error types
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or empty required field
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Account already registered under this email
    #[error("User exists")]
    AlreadyExists,

    /// Unknown email or wrong password (deliberately indistinguishable)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// Session token error
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
