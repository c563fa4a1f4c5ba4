use thiserror::Error;

/// Error for TodoId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for TodoName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoNameError {
    #[error("Todo name cannot be empty")]
    Empty,
}

/// Top-level error for all todo-related operations
#[derive(Debug, Clone, Error)]
pub enum TodoError {
    #[error("Invalid todo ID: {0}")]
    InvalidTodoId(#[from] TodoIdError),

    #[error("Invalid todo name: {0}")]
    InvalidName(#[from] TodoNameError),

    #[error("Todo not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
