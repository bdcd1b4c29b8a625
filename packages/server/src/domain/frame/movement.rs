//! Movement channel frames.
//!
//! Inbound `playerId:x:y[:name][:skin]`, outbound
//! `Broadcast:<id>:<x>:<y>:<name>:<skin>` and `PlayerLeft:<id>`.

use std::fmt;

use super::{FIELD_SEPARATOR, MalformedFrame, parse_number};
use crate::domain::PlayerId;

pub const MIN_FIELDS: usize = 3;
pub const MAX_FIELDS: usize = 5;

pub const DEFAULT_NAME: &str = "Unknown";
pub const DEFAULT_SKIN: &str = "0xffffff";

/// Reply sent to the sender when the field count is out of range.
pub const INVALID_FORMAT_REPLY: &str = "Invalid format. Use playerId:x:y[:name][:skin]";
/// Reply sent to the sender when a numeric field does not parse.
pub const INVALID_NUMBERS_REPLY: &str = "Invalid numbers";

const OPCODE: &str = "movement";

/// A decoded position update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementFrame {
    pub player_id: PlayerId,
    pub x: i32,
    pub y: i32,
    pub name: String,
    pub skin: String,
}

impl MovementFrame {
    /// Decode one position update.
    ///
    /// Trailing empty fields are dropped before counting, so `"1:2:3:"` is a
    /// three-field frame.
    pub fn decode(raw: &str) -> Result<Self, MalformedFrame> {
        let mut fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
        while fields.last().is_some_and(|f| f.is_empty()) {
            fields.pop();
        }

        if !(MIN_FIELDS..=MAX_FIELDS).contains(&fields.len()) {
            return Err(MalformedFrame::Arity {
                opcode: OPCODE,
                expected: "3 to 5",
                found: fields.len(),
            });
        }

        let player_id = parse_number::<i64>("playerId", fields[0])?;
        let x = parse_number::<i32>("x", fields[1])?;
        let y = parse_number::<i32>("y", fields[2])?;

        Ok(Self {
            player_id: PlayerId::new(player_id),
            x,
            y,
            name: fields.get(3).unwrap_or(&DEFAULT_NAME).to_string(),
            skin: fields.get(4).unwrap_or(&DEFAULT_SKIN).to_string(),
        })
    }

    /// Reply owed to the sender of a frame that failed to decode.
    pub fn error_reply(error: &MalformedFrame) -> &'static str {
        match error {
            MalformedFrame::InvalidNumber { .. } => INVALID_NUMBERS_REPLY,
            MalformedFrame::Arity { .. } | MalformedFrame::UnknownOpcode(_) => {
                INVALID_FORMAT_REPLY
            }
        }
    }
}

/// Outbound movement frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovementEvent {
    Position(MovementFrame),
    PlayerLeft(PlayerId),
}

impl fmt::Display for MovementEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Position(frame) => write!(
                f,
                "Broadcast:{}:{}:{}:{}:{}",
                frame.player_id, frame.x, frame.y, frame.name, frame.skin
            ),
            Self::PlayerLeft(player_id) => write!(f, "PlayerLeft:{player_id}"),
        }
    }
}
