//! Text sub-protocols of the real-time channels.
//!
//! Both channels use UTF-8 text frames made of colon-delimited fields. Decoding
//! never panics: anything that does not fit the grammar comes back as a
//! [`MalformedFrame`] carrying a readable reason.

pub mod chat;
pub mod movement;

use thiserror::Error;

pub use chat::{ChatEvent, ChatFrame};
pub use movement::{MovementEvent, MovementFrame};

/// Field separator shared by both sub-protocols.
pub const FIELD_SEPARATOR: char = ':';

/// Why an inbound frame could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedFrame {
    #[error("unknown opcode in frame '{0}'")]
    UnknownOpcode(String),

    #[error("{opcode} frame has {found} fields, expected {expected}")]
    Arity {
        opcode: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("field '{field}' is not a valid integer: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

fn parse_number<T: std::str::FromStr>(
    field: &'static str,
    value: &str,
) -> Result<T, MalformedFrame> {
    value.parse().map_err(|_| MalformedFrame::InvalidNumber {
        field,
        value: value.to_string(),
    })
}
