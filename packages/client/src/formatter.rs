//! Message formatting utilities for client display.

use officeverse_server::domain::{ChatEvent, PlayerId, frame::chat::SYSTEM_SENDER};
use officeverse_shared::time::timestamp_to_local_clock;

const SEPARATOR: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render one frame pushed by the server.
    ///
    /// Frames that are not valid chat events are shown raw.
    pub fn format_incoming(raw: &str, me: PlayerId, received_at: i64) -> String {
        match ChatEvent::parse(raw) {
            Some(event) => Self::format_event(&event, me, received_at),
            None => Self::format_raw_message(raw),
        }
    }

    pub fn format_event(event: &ChatEvent, me: PlayerId, received_at: i64) -> String {
        match event {
            ChatEvent::Global { sender, text } if sender == SYSTEM_SENDER => {
                Self::format_notice(text)
            }
            ChatEvent::Global { sender, text } => {
                Self::format_chat_message(sender, text, received_at)
            }
            ChatEvent::Private { sender, text } => {
                Self::format_private_message(sender, text, received_at)
            }
            ChatEvent::System { text } => Self::format_system_message(text),
            ChatEvent::PlayerList { players } => Self::format_roster(players, me),
        }
    }

    /// Format the roster, marking the current player
    pub fn format_roster(players: &[PlayerId], me: PlayerId) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n{SEPARATOR}\nOnline players:\n"));

        if players.is_empty() {
            output.push_str("(No players)\n");
        } else {
            for player in players {
                let me_suffix = if *player == me { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", player, me_suffix));
            }
        }

        output.push_str(SEPARATOR);
        output.push('\n');
        output
    }

    /// Join and leave notices
    pub fn format_notice(text: &str) -> String {
        format!("\n* {}\n", text)
    }

    pub fn format_chat_message(from: &str, content: &str, received_at: i64) -> String {
        format!(
            "\n[{}] @{}: {}\n",
            timestamp_to_local_clock(received_at),
            from,
            content
        )
    }

    /// The server echoes our own whispers with a `To <id>` sender
    pub fn format_private_message(from: &str, content: &str, received_at: i64) -> String {
        let clock = timestamp_to_local_clock(received_at);
        match from.strip_prefix("To ") {
            Some(target) => format!("\n[{}] (whisper to @{}) {}\n", clock, target, content),
            None => format!("\n[{}] (whisper from @{}) {}\n", clock, from, content),
        }
    }

    pub fn format_system_message(text: &str) -> String {
        format!("\n! {}\n", text)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
