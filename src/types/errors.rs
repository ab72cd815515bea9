use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Payload error: Expected 'USER_ID|<id>' but found [{0}]")]
    InvalidFormat(String),
    #[error("Payload error: Unsupported prefix [{0}]")]
    InvalidPrefix(String),
    #[error("Payload error: User ID is empty")]
    EmptyUserId
}
