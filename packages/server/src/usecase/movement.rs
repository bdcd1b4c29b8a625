//! UseCase: 移動チャンネルの位置更新の中継

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    ConnectionId, IdentityRepository, MessagePusher, MovementEvent, MovementFrame,
};

use super::{ChannelHandler, ChannelHub};

/// 移動チャンネル
pub struct MovementRouter {
    hub: Arc<ChannelHub>,
}

impl MovementRouter {
    pub const CHANNEL: &'static str = "movement";

    pub fn new(pusher: Arc<dyn MessagePusher>, identities: Arc<dyn IdentityRepository>) -> Self {
        Self {
            hub: Arc::new(ChannelHub::new(Self::CHANNEL, pusher, identities)),
        }
    }

    /// 位置更新を送信者を含む全員に 1 回だけ転送する
    pub async fn relay(&self, connection_id: &ConnectionId, frame: MovementFrame) -> usize {
        self.hub.bind(*connection_id, frame.player_id).await;
        let event = MovementEvent::Position(frame);
        self.hub.broadcast(&event.to_string()).await
    }
}

#[async_trait]
impl ChannelHandler for MovementRouter {
    fn hub(&self) -> &ChannelHub {
        &self.hub
    }

    async fn on_text(&self, connection_id: &ConnectionId, text: &str) {
        match MovementFrame::decode(text) {
            Ok(frame) => {
                self.relay(connection_id, frame).await;
            }
            Err(e) => {
                tracing::debug!("Rejected movement frame from '{}': {}", connection_id, e);
                let reply = MovementFrame::error_reply(&e);
                if let Err(e) = self.hub.send_direct(connection_id, reply).await {
                    tracing::warn!("Failed to send movement error reply: {}", e);
                }
            }
        }
    }

    async fn on_close(&self, connection_id: &ConnectionId) {
        // 閉じた接続は登録簿から外れているので、残りの全員が対象になる
        if let Some(player_id) = self.hub.close(connection_id).await {
            let event = MovementEvent::PlayerLeft(player_id);
            self.hub.broadcast(&event.to_string()).await;
        }
    }
}
