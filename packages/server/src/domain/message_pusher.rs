//! Outbound delivery port.
//!
//! `MessagePusher` is the connection registry of one channel together with the
//! two delivery modes the channels need: fan-out to many connections and a
//! single direct send. Implementations must never hold their internal lock
//! while a message is handed to the transport.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, Timestamp};

/// Sending half of a connection's bounded outbound queue.
pub type PusherChannel = mpsc::Sender<String>;

/// Registry entry summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub id: ConnectionId,
    pub connected_at: Timestamp,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Add a connection to the registry.
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Remove a connection. Returns `false` when it was not registered, which
    /// lets callers run their close sequence at most once.
    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool;

    /// Registered connections in registration order.
    async fn connections(&self) -> Vec<ConnectionInfo>;

    /// Deliver `content` to exactly one connection.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Deliver `content` to every open connection among `targets`.
    ///
    /// Individual failures are logged and skipped. Returns the number of
    /// connections the message was handed to.
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> usize;
}
