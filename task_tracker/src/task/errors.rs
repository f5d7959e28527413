//! Task error types.

use thiserror::Error;

/// Task operation errors
#[derive(Debug, Error)]
pub enum TaskError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Title missing from the request
    #[error("Title is required")]
    MissingTitle,

    /// No such task for this user. Also returned for tasks owned by
    /// another user, so their existence is not observable.
    #[error("Task not found")]
    NotFound,
}

impl TaskError {
    /// Get a client-safe error message that doesn't leak sensitive information
    pub fn client_message(&self) -> String {
        match self {
            TaskError::Database(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for task operations
pub type TaskResult<T> = Result<T, TaskError>;
