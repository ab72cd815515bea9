use crate::types::UserId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReputationError {
    #[error("User ID [{user_id}] not found in transaction history")]
    UserNotFound {
        user_id: UserId
    }
}
