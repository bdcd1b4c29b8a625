//! UseCase error types.

use thiserror::Error;

use crate::domain::{MessagePushError, PlayerId};

/// Failure to reach a player through its bound connection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectSendError {
    #[error("player {0} is not bound to any connection")]
    PlayerNotBound(PlayerId),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}
