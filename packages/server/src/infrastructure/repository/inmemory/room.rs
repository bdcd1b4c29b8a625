//! InMemory Room Directory 実装
//!
//! ドメイン層が定義する RoomDirectory trait の具体的な実装。
//! BTreeMap をインメモリ DB として使用します。

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    PlayerDirectory, PlayerId, PlayerProfile, Room, RoomDirectory, RoomDirectoryError, RoomId,
    entity::DEFAULT_ROOM_TYPE,
};

#[derive(Default)]
struct RoomStore {
    rooms: BTreeMap<RoomId, Room>,
    next_id: u64,
}

/// インメモリ Room Directory 実装
#[derive(Default)]
pub struct InMemoryRoomDirectory {
    store: Mutex<RoomStore>,
}

impl InMemoryRoomDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRoomDirectory {
    async fn create_room(
        &self,
        name: String,
        max_players: usize,
        is_private: bool,
        host_id: Option<PlayerId>,
    ) -> Room {
        let mut store = self.store.lock().await;
        store.next_id += 1;
        let room = Room::new(
            RoomId::new(store.next_id),
            name,
            max_players,
            is_private,
            host_id,
        );
        store.rooms.insert(room.id, room.clone());
        tracing::info!("Room {} '{}' created", room.id, room.name);
        room
    }

    async fn find_room(&self, room_id: RoomId) -> Option<Room> {
        self.store.lock().await.rooms.get(&room_id).cloned()
    }

    async fn find_room_by_name(&self, name: &str) -> Option<Room> {
        let store = self.store.lock().await;
        store.rooms.values().find(|room| room.name == name).cloned()
    }

    async fn all_rooms(&self) -> Vec<Room> {
        self.store.lock().await.rooms.values().cloned().collect()
    }

    async fn delete_room(&self, room_id: RoomId) -> Result<(), RoomDirectoryError> {
        let mut store = self.store.lock().await;
        store
            .rooms
            .remove(&room_id)
            .map(|_| tracing::info!("Room {} deleted", room_id))
            .ok_or(RoomDirectoryError::RoomNotFound(room_id))
    }

    async fn add_participant(
        &self,
        room_id: RoomId,
        player_id: PlayerId,
        players: &dyn PlayerDirectory,
    ) -> Result<(), RoomDirectoryError> {
        if self.find_room(room_id).await.is_none() {
            return Err(RoomDirectoryError::RoomNotFound(room_id));
        }
        let profile = players
            .find_player(player_id)
            .await
            .ok_or(RoomDirectoryError::PlayerNotFound(player_id))?;

        let mut store = self.store.lock().await;
        let room = store
            .rooms
            .get_mut(&room_id)
            .ok_or(RoomDirectoryError::RoomNotFound(room_id))?;

        if room.contains(player_id) {
            return Ok(());
        }
        if room.is_full() {
            return Err(RoomDirectoryError::RoomFull {
                room_id,
                max_players: room.max_players,
            });
        }
        room.players.push(profile);
        Ok(())
    }

    async fn remove_participant(&self, room_id: RoomId, player_id: PlayerId) {
        let mut store = self.store.lock().await;
        let Some(room) = store.rooms.get_mut(&room_id) else {
            return;
        };
        room.players.retain(|p| p.id != player_id);

        // 空になった部屋は削除する
        if room.players.is_empty() {
            store.rooms.remove(&room_id);
            tracing::info!("Room {} is empty and was deleted", room_id);
        }
    }

    async fn participants(&self, room_id: RoomId) -> Vec<PlayerProfile> {
        self.find_room(room_id)
            .await
            .map(|room| room.players)
            .unwrap_or_default()
    }

    async fn is_host(&self, room_id: RoomId, player_id: PlayerId) -> bool {
        self.find_room(room_id)
            .await
            .is_some_and(|room| room.is_host(player_id))
    }

    async fn room_type(&self, room_id: RoomId) -> String {
        self.find_room(room_id)
            .await
            .map(|room| room.room_type)
            .unwrap_or_else(|| DEFAULT_ROOM_TYPE.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryPlayerDirectory;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomDirectory の作成・検索・削除
    // - 参加者の追加・削除と定員チェック
    //
    // 【どのようなシナリオをテストするか】
    // 1. 部屋の作成と ID / 名前での検索
    // 2. 参加者追加の成功ケースと冪等性
    // 3. 定員超過・未知の部屋・未知のプレイヤー（エラーケース）
    // 4. 最後の参加者が抜けた部屋の削除
    // ========================================

    async fn create_players(ids: &[i64]) -> InMemoryPlayerDirectory {
        let players = InMemoryPlayerDirectory::new();
        for id in ids {
            players
                .upsert_player(PlayerProfile::new(
                    PlayerId::new(*id),
                    format!("player-{id}"),
                    "0xffffff",
                ))
                .await;
        }
        players
    }

    #[tokio::test]
    async fn test_create_and_find_room() {
        // テスト項目: 作成した部屋を ID と名前で検索できる
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();

        // when (操作):
        let lobby = directory
            .create_room("lobby".to_string(), 4, false, Some(PlayerId::new(1)))
            .await;
        let meeting = directory
            .create_room("meeting".to_string(), 2, true, None)
            .await;

        // then (期待する結果):
        assert_ne!(lobby.id, meeting.id);
        assert_eq!(directory.find_room(lobby.id).await, Some(lobby.clone()));
        assert_eq!(
            directory.find_room_by_name("meeting").await.map(|r| r.id),
            Some(meeting.id)
        );
        assert_eq!(directory.all_rooms().await.len(), 2);
        assert!(directory.is_host(lobby.id, PlayerId::new(1)).await);
        assert!(!directory.is_host(meeting.id, PlayerId::new(1)).await);
    }

    #[tokio::test]
    async fn test_add_participant_is_idempotent() {
        // テスト項目: 同じプレイヤーを 2 回追加しても 1 人分だけ登録される
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let players = create_players(&[1]).await;
        let room = directory.create_room("lobby".to_string(), 4, false, None).await;

        // when (操作):
        let first = directory
            .add_participant(room.id, PlayerId::new(1), &players)
            .await;
        let second = directory
            .add_participant(room.id, PlayerId::new(1), &players)
            .await;

        // then (期待する結果):
        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(directory.participants(room.id).await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_participant_capacity_exceeded() {
        // テスト項目: 定員を超える参加はエラーになる
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let players = create_players(&[1, 2]).await;
        let room = directory.create_room("booth".to_string(), 1, false, None).await;
        directory
            .add_participant(room.id, PlayerId::new(1), &players)
            .await
            .unwrap();

        // when (操作):
        let result = directory
            .add_participant(room.id, PlayerId::new(2), &players)
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomDirectoryError::RoomFull {
                room_id: room.id,
                max_players: 1
            })
        );
    }

    #[tokio::test]
    async fn test_add_participant_unknown_room_or_player() {
        // テスト項目: 未知の部屋・未知のプレイヤーはエラーになる
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let players = create_players(&[1]).await;
        let room = directory.create_room("lobby".to_string(), 4, false, None).await;

        // when (操作):
        let unknown_room = directory
            .add_participant(RoomId::new(99), PlayerId::new(1), &players)
            .await;
        let unknown_player = directory
            .add_participant(room.id, PlayerId::new(2), &players)
            .await;

        // then (期待する結果):
        assert_eq!(
            unknown_room,
            Err(RoomDirectoryError::RoomNotFound(RoomId::new(99)))
        );
        assert_eq!(
            unknown_player,
            Err(RoomDirectoryError::PlayerNotFound(PlayerId::new(2)))
        );
    }

    #[tokio::test]
    async fn test_remove_last_participant_deletes_room() {
        // テスト項目: 最後の参加者が抜けると部屋が削除される
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let players = create_players(&[1, 2]).await;
        let room = directory.create_room("lobby".to_string(), 4, false, None).await;
        for id in [1, 2] {
            directory
                .add_participant(room.id, PlayerId::new(id), &players)
                .await
                .unwrap();
        }

        // when (操作):
        directory.remove_participant(room.id, PlayerId::new(1)).await;
        let after_first = directory.find_room(room.id).await;
        directory.remove_participant(room.id, PlayerId::new(2)).await;

        // then (期待する結果):
        assert_eq!(after_first.map(|r| r.players.len()), Some(1));
        assert_eq!(directory.find_room(room.id).await, None);
        assert_eq!(directory.room_type(room.id).await, DEFAULT_ROOM_TYPE);
    }

    #[tokio::test]
    async fn test_delete_unknown_room() {
        // テスト項目: 存在しない部屋の削除はエラーを返す
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();

        // when (操作):
        let result = directory.delete_room(RoomId::new(5)).await;

        // then (期待する結果):
        assert_eq!(result, Err(RoomDirectoryError::RoomNotFound(RoomId::new(5))));
    }
}
