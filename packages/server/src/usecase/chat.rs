//! UseCase: チャットチャンネルのメッセージ振り分け
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - REGISTER / GLOBAL / PRIVATE の各オペコードの処理
//! - 切断時の退出通知とロスター更新
//!
//! ### なぜこのテストが必要か
//! - 参加者の対応表とロスターが常に一致していることを保証する
//! - 個別送信の失敗が送信者にだけ伝わることを保証する
//!
//! ### どのような状況を想定しているか
//! - 正常系：登録、全体チャット、個別チャット
//! - 異常系：不正なフレーム、オフラインの宛先
//! - エッジケース：同じ接続での再登録、二重切断

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    ChatEvent, ChatFrame, ConnectionId, IdentityRepository, MessagePusher, PlayerId,
};

use super::{ChannelHandler, ChannelHub, PresenceAnnouncer};

/// チャットチャンネル
pub struct ChatRouter {
    hub: Arc<ChannelHub>,
    presence: PresenceAnnouncer,
}

impl ChatRouter {
    pub const CHANNEL: &'static str = "chat";

    pub fn new(pusher: Arc<dyn MessagePusher>, identities: Arc<dyn IdentityRepository>) -> Self {
        let hub = Arc::new(ChannelHub::new(Self::CHANNEL, pusher, identities));
        Self {
            presence: PresenceAnnouncer::new(hub.clone()),
            hub,
        }
    }

    /// デコード済みのフレームを処理する
    pub async fn dispatch(&self, connection_id: &ConnectionId, frame: ChatFrame) {
        match frame {
            ChatFrame::Register { player_id } => self.register(connection_id, player_id).await,
            ChatFrame::Global { sender, text } => self.relay_global(sender, text).await,
            ChatFrame::Private {
                sender,
                target,
                text,
            } => self.send_private(connection_id, sender, target, text).await,
        }
    }

    async fn register(&self, connection_id: &ConnectionId, player_id: PlayerId) {
        self.hub.bind(*connection_id, player_id).await;
        self.presence.announce_joined(player_id).await;
    }

    async fn relay_global(&self, sender: String, text: String) {
        let event = ChatEvent::Global { sender, text };
        let delivered = self.hub.broadcast(&event.to_string()).await;
        tracing::debug!("Relayed global chat to {} connections", delivered);
    }

    async fn send_private(
        &self,
        connection_id: &ConnectionId,
        sender: String,
        target: PlayerId,
        text: String,
    ) {
        let delivery = ChatEvent::Private {
            sender,
            text: text.clone(),
        };

        let reply = match self.hub.send_to_player(target, &delivery.to_string()).await {
            Ok(()) => ChatEvent::private_echo(target, text),
            Err(e) => {
                tracing::debug!("Private message to player {} not delivered: {}", target, e);
                ChatEvent::target_offline(target)
            }
        };

        if let Err(e) = self.hub.send_direct(connection_id, &reply.to_string()).await {
            tracing::warn!("Failed to reply to private message sender: {}", e);
        }
    }
}

#[async_trait]
impl ChannelHandler for ChatRouter {
    fn hub(&self) -> &ChannelHub {
        &self.hub
    }

    async fn on_text(&self, connection_id: &ConnectionId, text: &str) {
        match ChatFrame::decode(text) {
            Ok(frame) => self.dispatch(connection_id, frame).await,
            Err(e) => {
                tracing::debug!("Ignoring chat frame from '{}': {}", connection_id, e);
            }
        }
    }

    async fn on_close(&self, connection_id: &ConnectionId) {
        if let Some(player_id) = self.hub.close(connection_id).await {
            self.presence.announce_left(player_id).await;
        }
    }
}
