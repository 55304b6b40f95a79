use thiserror::Error;

/// The result of a fallible envelope operation
pub type MessageResult<T> = Result<T, MessageError>;

/// Represents a rejected envelope operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    /// An argument was absent or out of range. Nothing was assigned.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl MessageError {
    pub(crate) fn invalid_argument(reason: &str) -> MessageError {
        MessageError::InvalidArgument(reason.to_owned())
    }
}
