//! HTTP API response DTOs.

use serde::Serialize;

use officeverse_shared::time::timestamp_to_rfc3339;

use crate::domain::{ConnectionInfo, PlayerId};

#[derive(Debug, Serialize)]
pub struct ConnectionDto {
    pub id: String,
    pub connected_at: String,
}

impl From<ConnectionInfo> for ConnectionDto {
    fn from(info: ConnectionInfo) -> Self {
        Self {
            id: info.id.to_string(),
            connected_at: timestamp_to_rfc3339(info.connected_at.value()),
        }
    }
}

/// State of one real-time channel
#[derive(Debug, Serialize)]
pub struct ChannelStateDto {
    pub channel: String,
    pub connections: Vec<ConnectionDto>,
    pub roster: Vec<i64>,
}

impl ChannelStateDto {
    pub fn new(channel: &str, connections: Vec<ConnectionInfo>, roster: Vec<PlayerId>) -> Self {
        Self {
            channel: channel.to_string(),
            connections: connections.into_iter().map(ConnectionDto::from).collect(),
            roster: roster.iter().map(PlayerId::value).collect(),
        }
    }
}
