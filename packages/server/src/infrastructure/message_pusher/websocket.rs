//! WebSocket 接続向けの MessagePusher 実装
//!
//! ## 責務
//!
//! - チャンネルに接続中のクライアントと送信キュー（`PusherChannel`）の管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成と書き込みタスクは UI 層（`ui/handler/websocket.rs`）が持ちます。
//! この実装は送信キューに文字列を積むだけで、ネットワーク I/O は行いません。
//!
//! - ロック中に行うのは送信先の決定（sender の clone）のみ
//! - キューへの投入はロック解放後に `try_send` で行う
//! - キューが満杯のクライアントは、そのクライアント宛てのメッセージだけが落ちる

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use officeverse_shared::time::{Clock, SystemClock};
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::domain::{
    ConnectionId, ConnectionInfo, MessagePushError, MessagePusher, PusherChannel, Timestamp,
};

struct RegisteredClient {
    sender: PusherChannel,
    connected_at: Timestamp,
}

/// 接続ごとの送信キューを使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::default();
/// let (tx, rx) = tokio::sync::mpsc::channel(256);
/// pusher.register_client(connection_id, tx).await;
///
/// pusher.push_to(&connection_id, "GLOBAL:7:hello").await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアント（登録順）
    clients: Mutex<IndexMap<ConnectionId, RegisteredClient>>,
    clock: Arc<dyn Clock>,
}

impl WebSocketMessagePusher {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clients: Mutex::new(IndexMap::new()),
            clock,
        }
    }

    fn deliver(
        connection_id: ConnectionId,
        sender: &PusherChannel,
        content: &str,
    ) -> Result<(), MessagePushError> {
        sender
            .try_send(content.to_string())
            .map_err(|e| match e {
                TrySendError::Full(_) => MessagePushError::QueueFull(connection_id),
                TrySendError::Closed(_) => MessagePushError::ChannelClosed(connection_id),
            })
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let connected_at = Timestamp::new(self.clock.now_millis());
        let mut clients = self.clients.lock().await;
        clients.insert(
            connection_id,
            RegisteredClient {
                sender,
                connected_at,
            },
        );
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) -> bool {
        let mut clients = self.clients.lock().await;
        let removed = clients.shift_remove(connection_id).is_some();
        if removed {
            tracing::debug!(
                "Connection '{}' unregistered from MessagePusher",
                connection_id
            );
        }
        removed
    }

    async fn connections(&self) -> Vec<ConnectionInfo> {
        let clients = self.clients.lock().await;
        clients
            .iter()
            .map(|(id, client)| ConnectionInfo {
                id: *id,
                connected_at: client.connected_at,
            })
            .collect()
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let sender = {
            let clients = self.clients.lock().await;
            clients
                .get(connection_id)
                .map(|client| client.sender.clone())
                .ok_or(MessagePushError::ClientNotFound(*connection_id))?
        };

        Self::deliver(*connection_id, &sender, content)?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> usize {
        // 送信先の決定だけをロック中に行う
        let recipients: Vec<(ConnectionId, PusherChannel)> = {
            let clients = self.clients.lock().await;
            targets
                .into_iter()
                .filter_map(|id| match clients.get(&id) {
                    Some(client) => Some((id, client.sender.clone())),
                    None => {
                        tracing::debug!("Connection '{}' left before broadcast, skipping", id);
                        None
                    }
                })
                .collect()
        };

        let mut delivered = 0;
        for (id, sender) in recipients {
            if sender.is_closed() {
                tracing::debug!("Connection '{}' is closing, skipping", id);
                continue;
            }
            // ブロードキャストでは一部の送信失敗を許容
            match Self::deliver(id, &sender, content) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Failed to push message: {}", e),
            }
        }

        delivered
    }
}
