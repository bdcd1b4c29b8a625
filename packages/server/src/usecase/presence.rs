//! UseCase: 参加・退出の通知とロスター配信（チャットチャンネル）

use std::sync::Arc;

use crate::domain::{ChatEvent, PlayerId};

use super::ChannelHub;

/// 参加者の増減をチャンネル全体に知らせる
pub struct PresenceAnnouncer {
    hub: Arc<ChannelHub>,
}

impl PresenceAnnouncer {
    pub fn new(hub: Arc<ChannelHub>) -> Self {
        Self { hub }
    }

    /// 参加通知のあとに最新のロスターを配信する
    pub async fn announce_joined(&self, player_id: PlayerId) {
        self.hub
            .broadcast(&ChatEvent::joined(player_id).to_string())
            .await;
        self.broadcast_roster().await;
        tracing::info!("[{}] announced join of player {}", self.hub.name(), player_id);
    }

    /// 退出通知のあとに最新のロスターを配信する
    pub async fn announce_left(&self, player_id: PlayerId) {
        self.hub
            .broadcast(&ChatEvent::left(player_id).to_string())
            .await;
        self.broadcast_roster().await;
        tracing::info!("[{}] announced departure of player {}", self.hub.name(), player_id);
    }

    /// ロスターは対応表から毎回計算し直す
    pub async fn broadcast_roster(&self) -> usize {
        let roster = self.hub.roster().await;
        self.hub
            .broadcast(&ChatEvent::roster(roster).to_string())
            .await
    }
}
