//! InMemory Identity Repository 実装
//!
//! ドメイン層の `IdentityBinding`（双方向マップ）を Mutex で保護し、
//! `IdentityRepository` trait を実装します。ロック中に行うのは
//! 挿入・削除・参照のみで、ネットワーク I/O は行いません。

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{BindOutcome, ConnectionId, IdentityBinding, IdentityRepository, PlayerId};

#[derive(Default)]
pub struct InMemoryIdentityRepository {
    binding: Mutex<IdentityBinding>,
}

impl InMemoryIdentityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn bind(&self, connection_id: ConnectionId, player_id: PlayerId) -> BindOutcome {
        self.binding.lock().await.bind(connection_id, player_id)
    }

    async fn unbind(&self, connection_id: &ConnectionId) -> Option<PlayerId> {
        self.binding.lock().await.unbind(connection_id)
    }

    async fn lookup_by_connection(&self, connection_id: &ConnectionId) -> Option<PlayerId> {
        self.binding.lock().await.lookup_by_connection(connection_id)
    }

    async fn lookup_by_player(&self, player_id: PlayerId) -> Option<ConnectionId> {
        self.binding.lock().await.lookup_by_player(player_id)
    }

    async fn all_bound(&self) -> Vec<PlayerId> {
        self.binding.lock().await.all_bound()
    }
}
