// Error types for the store, input validation and session operations.

use thiserror::Error;

/// Failures while reading or rewriting the user file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on user store: {0}")]
    Io(#[from] std::io::Error),

    /// `record` is the 1-based position of the block in the file.
    #[error("malformed user record #{record}: {reason}")]
    MalformedRecord { record: usize, reason: String },

    #[error("failed to replace user store: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Rejected user input. The UI shows the message and asks again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} must be a single word without spaces")]
    ContainsWhitespace { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} must fit on a single line")]
    MultiLine { field: &'static str },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Incorrect username or password!")]
    InvalidCredentials,

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Members only! Activate subscription first.")]
    NotSubscribed,

    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
