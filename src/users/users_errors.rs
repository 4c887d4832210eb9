use thiserror::Error;

/// Custom error type for user-related operations
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("A user with email '{0}' already exists")]
    DuplicateEmail(String),
}
