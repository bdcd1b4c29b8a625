//! InMemory Player Directory 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{PlayerDirectory, PlayerId, PlayerProfile};

#[derive(Default)]
pub struct InMemoryPlayerDirectory {
    players: RwLock<HashMap<PlayerId, PlayerProfile>>,
}

impl InMemoryPlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PlayerDirectory for InMemoryPlayerDirectory {
    async fn find_player(&self, player_id: PlayerId) -> Option<PlayerProfile> {
        self.players.read().await.get(&player_id).cloned()
    }

    async fn upsert_player(&self, profile: PlayerProfile) {
        self.players.write().await.insert(profile.id, profile);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_overwrites_profile() {
        // テスト項目: 同じ ID のプロフィールは上書きされる
        // given (前提条件):
        let directory = InMemoryPlayerDirectory::new();
        let id = PlayerId::new(1);
        directory
            .upsert_player(PlayerProfile::new(id, "Alice", "0xffffff"))
            .await;

        // when (操作):
        directory
            .upsert_player(PlayerProfile::new(id, "Alice", "0x00ff00"))
            .await;

        // then (期待する結果):
        let found = directory.find_player(id).await.unwrap();
        assert_eq!(found.skin, "0x00ff00");
        assert_eq!(directory.find_player(PlayerId::new(2)).await, None);
    }
}
