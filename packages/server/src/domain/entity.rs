//! Entities owned by the room and player collaborators.
//!
//! The broadcast core never touches these; they back the room-management
//! flows that sit next to the real-time channels.

use serde::Serialize;

use super::{PlayerId, RoomId};

/// Room type reported for rooms the directory does not know.
pub const DEFAULT_ROOM_TYPE: &str = "NORMAL";

/// Participant profile data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerProfile {
    pub id: PlayerId,
    pub name: String,
    pub skin: String,
}

impl PlayerProfile {
    pub fn new(id: PlayerId, name: impl Into<String>, skin: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            skin: skin.into(),
        }
    }
}

/// A room of the virtual office.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub room_type: String,
    pub max_players: usize,
    pub is_private: bool,
    pub host_id: Option<PlayerId>,
    pub players: Vec<PlayerProfile>,
}

impl Room {
    pub fn new(
        id: RoomId,
        name: impl Into<String>,
        max_players: usize,
        is_private: bool,
        host_id: Option<PlayerId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            room_type: DEFAULT_ROOM_TYPE.to_string(),
            max_players,
            is_private,
            host_id,
            players: Vec::new(),
        }
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    pub fn is_host(&self, player_id: PlayerId) -> bool {
        self.host_id == Some(player_id)
    }
}
