//! Per-connection lifecycle contract of a real-time channel.

use async_trait::async_trait;

use crate::domain::{ConnectionId, PusherChannel};

use super::ChannelHub;

/// Behaviour of one channel, driven by the WebSocket handler.
///
/// For a given connection `on_open` runs first, then `on_text` once per
/// inbound text frame in arrival order, then `on_close` once.
#[async_trait]
pub trait ChannelHandler: Send + Sync {
    fn hub(&self) -> &ChannelHub;

    async fn on_open(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.hub().open(connection_id, sender).await;
    }

    async fn on_text(&self, connection_id: &ConnectionId, text: &str);

    async fn on_close(&self, connection_id: &ConnectionId);
}
