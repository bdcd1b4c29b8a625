mod http;
mod websocket;

pub use http::{debug_channel_state, health_check};
pub use websocket::{chat_handler, movement_handler};
