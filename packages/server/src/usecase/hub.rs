//! UseCase: チャンネル共通のセッション管理とブロードキャスト
//!
//! ## 責務
//!
//! - 接続の登録・解除（ConnectionRegistry）
//! - 接続と PlayerID の対応付け（IdentityBinding）
//! - 全体配信（BroadcastEngine）と個別送信（DirectMessenger）
//!
//! チャットと移動の 2 つのチャンネルが、それぞれ 1 つずつ `ChannelHub` を持つ。

use std::sync::Arc;

use crate::domain::{
    BindOutcome, ConnectionId, ConnectionInfo, IdentityRepository, MessagePushError,
    MessagePusher, PlayerId, PusherChannel,
};

use super::error::DirectSendError;

/// チャンネル 1 つ分のセッション管理
pub struct ChannelHub {
    name: &'static str,
    /// MessagePusher（接続の登録簿と送信の抽象化）
    pusher: Arc<dyn MessagePusher>,
    /// IdentityRepository（接続と PlayerID の対応表）
    identities: Arc<dyn IdentityRepository>,
}

impl ChannelHub {
    pub fn new(
        name: &'static str,
        pusher: Arc<dyn MessagePusher>,
        identities: Arc<dyn IdentityRepository>,
    ) -> Self {
        Self {
            name,
            pusher,
            identities,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 接続を登録する
    pub async fn open(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.pusher.register_client(connection_id, sender).await;
        tracing::info!("[{}] connection '{}' opened", self.name, connection_id);
    }

    /// 接続を閉じ、結び付いていた PlayerID を返す
    ///
    /// 2 回目以降の呼び出しは何もせず `None` を返す。
    pub async fn close(&self, connection_id: &ConnectionId) -> Option<PlayerId> {
        if !self.pusher.unregister_client(connection_id).await {
            tracing::debug!(
                "[{}] connection '{}' already closed",
                self.name,
                connection_id
            );
            return None;
        }

        let player_id = self.identities.unbind(connection_id).await;
        match player_id {
            Some(player_id) => tracing::info!(
                "[{}] connection '{}' of player {} closed",
                self.name,
                connection_id,
                player_id
            ),
            None => tracing::info!(
                "[{}] unbound connection '{}' closed",
                self.name,
                connection_id
            ),
        }
        player_id
    }

    /// 接続に PlayerID を結び付ける（上書き）
    pub async fn bind(&self, connection_id: ConnectionId, player_id: PlayerId) -> BindOutcome {
        let outcome = self.identities.bind(connection_id, player_id).await;
        if let Some(previous) = outcome.previous {
            tracing::info!(
                "[{}] connection '{}' rebound from player {} to {}",
                self.name,
                connection_id,
                previous,
                player_id
            );
        }
        if let Some(displaced) = outcome.displaced {
            tracing::warn!(
                "[{}] player {} moved from connection '{}' to '{}'",
                self.name,
                player_id,
                displaced,
                connection_id
            );
        }
        outcome
    }

    pub async fn lookup(&self, connection_id: &ConnectionId) -> Option<PlayerId> {
        self.identities.lookup_by_connection(connection_id).await
    }

    /// 現在のロスター（登録順）
    pub async fn roster(&self) -> Vec<PlayerId> {
        self.identities.all_bound().await
    }

    pub async fn connections(&self) -> Vec<ConnectionInfo> {
        self.pusher.connections().await
    }

    /// 全ての接続に配信する
    pub async fn broadcast(&self, content: &str) -> usize {
        let targets = self.snapshot(None).await;
        self.pusher.broadcast(targets, content).await
    }

    /// `exclude` 以外の全ての接続に配信する
    pub async fn broadcast_except(&self, exclude: &ConnectionId, content: &str) -> usize {
        let targets = self.snapshot(Some(exclude)).await;
        self.pusher.broadcast(targets, content).await
    }

    /// 1 つの接続に送信する（失敗は呼び出し元に返す）
    pub async fn send_direct(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        self.pusher.push_to(connection_id, content).await
    }

    /// PlayerID に結び付いた接続に送信する
    pub async fn send_to_player(
        &self,
        player_id: PlayerId,
        content: &str,
    ) -> Result<(), DirectSendError> {
        let connection_id = self
            .identities
            .lookup_by_player(player_id)
            .await
            .ok_or(DirectSendError::PlayerNotBound(player_id))?;
        self.pusher.push_to(&connection_id, content).await?;
        Ok(())
    }

    async fn snapshot(&self, exclude: Option<&ConnectionId>) -> Vec<ConnectionId> {
        self.pusher
            .connections()
            .await
            .into_iter()
            .map(|info| info.id)
            .filter(|id| Some(id) != exclude)
            .collect()
    }
}
