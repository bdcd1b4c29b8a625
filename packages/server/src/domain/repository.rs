//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    BindOutcome, ConnectionId, PlayerId, PlayerProfile, Room, RoomDirectoryError, RoomId,
};

/// 接続と PlayerID の対応表
///
/// チャンネルごとに 1 つ存在し、接続のライフサイクルから並行に更新される。
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// 接続に PlayerID を結び付ける（既存の対応は上書き）
    async fn bind(&self, connection_id: ConnectionId, player_id: PlayerId) -> BindOutcome;

    /// 接続の対応を削除し、結び付いていた PlayerID を返す
    async fn unbind(&self, connection_id: &ConnectionId) -> Option<PlayerId>;

    async fn lookup_by_connection(&self, connection_id: &ConnectionId) -> Option<PlayerId>;

    async fn lookup_by_player(&self, player_id: PlayerId) -> Option<ConnectionId>;

    /// 結び付いている PlayerID を登録順で取得
    async fn all_bound(&self) -> Vec<PlayerId>;
}

/// プレイヤープロフィールの参照先
#[async_trait]
pub trait PlayerDirectory: Send + Sync {
    async fn find_player(&self, player_id: PlayerId) -> Option<PlayerProfile>;

    async fn upsert_player(&self, profile: PlayerProfile);
}

/// Room の管理
///
/// リアルタイムのブロードキャスト処理からは呼ばれない。部屋の作成・入退室など
/// 周辺のフローが利用する。
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    async fn create_room(
        &self,
        name: String,
        max_players: usize,
        is_private: bool,
        host_id: Option<PlayerId>,
    ) -> Room;

    async fn find_room(&self, room_id: RoomId) -> Option<Room>;

    async fn find_room_by_name(&self, name: &str) -> Option<Room>;

    async fn all_rooms(&self) -> Vec<Room>;

    async fn delete_room(&self, room_id: RoomId) -> Result<(), RoomDirectoryError>;

    /// 参加者を追加（既に参加済みなら何もしない）
    async fn add_participant(
        &self,
        room_id: RoomId,
        player_id: PlayerId,
        players: &dyn PlayerDirectory,
    ) -> Result<(), RoomDirectoryError>;

    /// 参加者を削除（空になった部屋は削除される）
    async fn remove_participant(&self, room_id: RoomId, player_id: PlayerId);

    async fn participants(&self, room_id: RoomId) -> Vec<PlayerProfile>;

    async fn is_host(&self, room_id: RoomId, player_id: PlayerId) -> bool;

    /// 部屋の種別（未知の部屋は `"NORMAL"`）
    async fn room_type(&self, room_id: RoomId) -> String;
}
