//! Chat channel frames.
//!
//! Inbound:
//!
//! ```text
//! REGISTER:<playerId>
//! GLOBAL:<senderId>:<text>
//! PRIVATE:<senderId>:<targetId>:<text>
//! ```
//!
//! Outbound: `GLOBAL:<sender>:<text>`, `PRIVATE:<sender>:<text>`,
//! `SYSTEM:<text>` and `PLAYER_LIST:<id,id,...>`.

use std::fmt;

use super::{FIELD_SEPARATOR, MalformedFrame, parse_number};
use crate::domain::PlayerId;

/// Upper bound on the number of fields of an inbound chat frame.
pub const MAX_PARTS: usize = 4;

/// Sender name used for presence notices.
pub const SYSTEM_SENDER: &str = "System";

const REGISTER: &str = "REGISTER";
const GLOBAL: &str = "GLOBAL";
const PRIVATE: &str = "PRIVATE";
const SYSTEM: &str = "SYSTEM";
const PLAYER_LIST: &str = "PLAYER_LIST";

/// Decoded inbound chat frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatFrame {
    Register {
        player_id: PlayerId,
    },
    Global {
        sender: String,
        text: String,
    },
    Private {
        sender: String,
        target: PlayerId,
        text: String,
    },
}

impl ChatFrame {
    /// Decode one inbound chat frame.
    ///
    /// The opcode is recognised by prefix. `GLOBAL` and `PRIVATE` keep the
    /// remainder of the frame as their text, so colons inside a message survive.
    pub fn decode(raw: &str) -> Result<Self, MalformedFrame> {
        let opcode = raw.split(FIELD_SEPARATOR).next().unwrap_or_default();
        if raw.len() == opcode.len() {
            return Err(MalformedFrame::UnknownOpcode(raw.to_string()));
        }

        match opcode {
            REGISTER => {
                let parts: Vec<&str> = raw.splitn(MAX_PARTS, FIELD_SEPARATOR).collect();
                let player_id = parse_number::<i64>("playerId", parts[1])?;
                Ok(Self::Register {
                    player_id: PlayerId::new(player_id),
                })
            }
            GLOBAL => {
                let parts: Vec<&str> = raw.splitn(3, FIELD_SEPARATOR).collect();
                let &[_, sender, text] = parts.as_slice() else {
                    return Err(MalformedFrame::Arity {
                        opcode: GLOBAL,
                        expected: "3",
                        found: parts.len(),
                    });
                };
                Ok(Self::Global {
                    sender: sender.to_string(),
                    text: text.to_string(),
                })
            }
            PRIVATE => {
                let parts: Vec<&str> = raw.splitn(MAX_PARTS, FIELD_SEPARATOR).collect();
                let &[_, sender, target, text] = parts.as_slice() else {
                    return Err(MalformedFrame::Arity {
                        opcode: PRIVATE,
                        expected: "4",
                        found: parts.len(),
                    });
                };
                let target = parse_number::<i64>("targetId", target)?;
                Ok(Self::Private {
                    sender: sender.to_string(),
                    target: PlayerId::new(target),
                    text: text.to_string(),
                })
            }
            _ => Err(MalformedFrame::UnknownOpcode(raw.to_string())),
        }
    }
}

impl fmt::Display for ChatFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Register { player_id } => write!(f, "{REGISTER}:{player_id}"),
            Self::Global { sender, text } => write!(f, "{GLOBAL}:{sender}:{text}"),
            Self::Private {
                sender,
                target,
                text,
            } => write!(f, "{PRIVATE}:{sender}:{target}:{text}"),
        }
    }
}

/// Outbound chat frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Relayed global chat, or a presence notice when `sender` is [`SYSTEM_SENDER`]
    Global { sender: String, text: String },
    /// Delivered private message, or the sender's `To <id>` echo
    Private { sender: String, text: String },
    /// Notice addressed to a single connection
    System { text: String },
    /// Current roster in insertion order
    PlayerList { players: Vec<PlayerId> },
}

impl ChatEvent {
    pub fn joined(player_id: PlayerId) -> Self {
        Self::Global {
            sender: SYSTEM_SENDER.to_string(),
            text: format!("Player {player_id} joined the game."),
        }
    }

    pub fn left(player_id: PlayerId) -> Self {
        Self::Global {
            sender: SYSTEM_SENDER.to_string(),
            text: format!("Player {player_id} left the game."),
        }
    }

    pub fn private_echo(target: PlayerId, text: impl Into<String>) -> Self {
        Self::Private {
            sender: format!("To {target}"),
            text: text.into(),
        }
    }

    pub fn target_offline(target: PlayerId) -> Self {
        Self::System {
            text: format!("Player {target} not found/offline."),
        }
    }

    pub fn roster(players: Vec<PlayerId>) -> Self {
        Self::PlayerList { players }
    }

    /// Parse an outbound frame as received by a client.
    pub fn parse(raw: &str) -> Option<Self> {
        let (opcode, rest) = raw.split_once(FIELD_SEPARATOR)?;
        match opcode {
            GLOBAL | PRIVATE => {
                let (sender, text) = rest.split_once(FIELD_SEPARATOR)?;
                let (sender, text) = (sender.to_string(), text.to_string());
                Some(if opcode == GLOBAL {
                    Self::Global { sender, text }
                } else {
                    Self::Private { sender, text }
                })
            }
            SYSTEM => Some(Self::System {
                text: rest.to_string(),
            }),
            PLAYER_LIST if rest.is_empty() => Some(Self::PlayerList {
                players: Vec::new(),
            }),
            PLAYER_LIST => rest
                .split(',')
                .map(|id| id.parse().ok())
                .collect::<Option<Vec<PlayerId>>>()
                .map(|players| Self::PlayerList { players }),
            _ => None,
        }
    }
}

impl fmt::Display for ChatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global { sender, text } => write!(f, "{GLOBAL}:{sender}:{text}"),
            Self::Private { sender, text } => write!(f, "{PRIVATE}:{sender}:{text}"),
            Self::System { text } => write!(f, "{SYSTEM}:{text}"),
            Self::PlayerList { players } => {
                let ids: Vec<String> = players.iter().map(PlayerId::to_string).collect();
                write!(f, "{PLAYER_LIST}:{}", ids.join(","))
            }
        }
    }
}
