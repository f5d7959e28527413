//! Authentication error types.

use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Email or password missing from the request
    #[error("Email and password are required")]
    MissingCredentials,

    /// Email already registered
    #[error("Email already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password. Deliberately a single variant:
    /// callers must not be able to tell which check failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token signature is bad, the token is malformed, or the
    /// presented refresh token does not match the stored one
    #[error("Invalid token")]
    TokenInvalid,

    /// Token signature is fine but the expiry has elapsed
    #[error("Token expired")]
    TokenExpired,

    /// Request carries no usable identity (missing bearer token, or
    /// the token's user no longer exists)
    #[error("Unauthenticated")]
    Unauthenticated,
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database errors are sanitized to prevent information disclosure
    /// about the internal system structure.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) | AuthError::HashingFailed => {
                "Internal server error".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
