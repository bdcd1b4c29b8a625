//! UI utilities for the client.

use std::io::Write;

use officeverse_server::domain::PlayerId;

pub fn prompt(player_id: PlayerId) -> String {
    format!("{}> ", player_id)
}

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(player_id: PlayerId) {
    print!("{}", prompt(player_id));
    std::io::stdout().flush().ok();
}
