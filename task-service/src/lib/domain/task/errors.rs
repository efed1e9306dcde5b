use thiserror::Error;

use crate::domain::task::models::TaskId;
use crate::domain::user::models::UserId;

/// Error type for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid task id: {0}")]
    InvalidFormat(String),
}

/// Error type for TaskTitle validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskTitleError {
    #[error("Task title is empty")]
    Empty,

    #[error("Task title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Task title contains a NUL character")]
    InvalidCharacter,
}

/// Error type for TaskDescription validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDescriptionError {
    #[error("Task description too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Task description contains a NUL character")]
    InvalidCharacter,
}

/// Error type for TaskStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskStatusError {
    #[error("Unknown task status: {0}")]
    Unknown(String),
}

/// Error type for page/size validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Page must be at least 1, got {0}")]
    PageOutOfRange(u32),

    #[error("Page size must be between 1 and {max}, got {actual}")]
    SizeOutOfRange { max: u32, actual: u32 },
}

/// Top-level error type for all task-related operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    #[error("Invalid task ID: {0}")]
    InvalidTaskId(#[from] TaskIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TaskTitleError),

    #[error("Invalid description: {0}")]
    InvalidDescription(#[from] TaskDescriptionError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] TaskStatusError),

    #[error("Invalid pagination: {0}")]
    InvalidPagination(#[from] PaginationError),

    #[error("Task {0} not found")]
    NotFound(TaskId),

    #[error("User {user_id} does not own task {task_id}")]
    AccessDenied { task_id: TaskId, user_id: UserId },

    /// Foreign-key violation on the owner reference.
    #[error("Owner {0} does not exist")]
    OwnerNotFound(UserId),

    /// Any integrity violation other than a missing owner.
    #[error("Invalid task data: {0}")]
    Validation(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}
