//! Connection ↔ player identity binding.
//!
//! A true bidirectional map: both directions are updated together on every
//! bind/unbind, so resolving the player of a closing connection never needs a
//! scan. Each connection maps to at most one player and each player to at most
//! one connection. When a player id is claimed by a second connection the
//! newest connection wins and the older one silently loses its binding.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::{ConnectionId, PlayerId};

/// What a [`IdentityBinding::bind`] call replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BindOutcome {
    /// Player previously bound to the same connection, if it was a different one
    pub previous: Option<PlayerId>,
    /// Other connection that held this player id before and lost it
    pub displaced: Option<ConnectionId>,
}

impl BindOutcome {
    pub fn is_fresh(&self) -> bool {
        self.previous.is_none() && self.displaced.is_none()
    }
}

#[derive(Debug, Default)]
pub struct IdentityBinding {
    by_connection: HashMap<ConnectionId, PlayerId>,
    // insertion order doubles as roster order
    by_player: IndexMap<PlayerId, ConnectionId>,
}

impl IdentityBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `connection` to `player_id`, overwriting any prior mapping of
    /// either side.
    pub fn bind(&mut self, connection: ConnectionId, player_id: PlayerId) -> BindOutcome {
        let mut outcome = BindOutcome::default();

        if let Some(prev) = self.by_connection.insert(connection, player_id)
            && prev != player_id
        {
            self.by_player.shift_remove(&prev);
            outcome.previous = Some(prev);
        }

        if let Some(&other) = self.by_player.get(&player_id)
            && other != connection
        {
            self.by_connection.remove(&other);
            outcome.displaced = Some(other);
        }

        // keeps the roster position when the id was already present
        self.by_player.insert(player_id, connection);

        outcome
    }

    /// Remove the binding of `connection`, returning the player it carried.
    pub fn unbind(&mut self, connection: &ConnectionId) -> Option<PlayerId> {
        let player_id = self.by_connection.remove(connection)?;
        if self.by_player.get(&player_id) == Some(connection) {
            self.by_player.shift_remove(&player_id);
        }
        Some(player_id)
    }

    pub fn lookup_by_connection(&self, connection: &ConnectionId) -> Option<PlayerId> {
        self.by_connection.get(connection).copied()
    }

    pub fn lookup_by_player(&self, player_id: PlayerId) -> Option<ConnectionId> {
        self.by_player.get(&player_id).copied()
    }

    /// Bound player ids in insertion order.
    pub fn all_bound(&self) -> Vec<PlayerId> {
        self.by_player.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.by_player.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_player.is_empty()
    }
}
