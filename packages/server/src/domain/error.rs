//! Domain error types.

use thiserror::Error;

use super::{ConnectionId, PlayerId, RoomId};

/// Failure of a single outbound delivery.
///
/// Only transport-level problems end up here; parse failures are reported
/// through [`super::MalformedFrame`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// The connection is not (or no longer) in the registry
    #[error("connection '{0}' is not registered")]
    ClientNotFound(ConnectionId),

    /// The connection's outbound queue is full (slow or stalled peer)
    #[error("outbound queue of connection '{0}' is full")]
    QueueFull(ConnectionId),

    /// The connection's writer has stopped
    #[error("connection '{0}' is closed")]
    ChannelClosed(ConnectionId),
}

/// Errors reported by a [`super::RoomDirectory`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomDirectoryError {
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("room {room_id} is full ({max_players} players)")]
    RoomFull { room_id: RoomId, max_players: usize },
}
