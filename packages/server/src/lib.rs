//! Real-time presence, chat and movement engine of the officeverse virtual office.
//!
//! Two WebSocket channels (`/chat` and `/movement`) share one
//! session-registry-and-broadcast engine (`usecase::ChannelHub`).

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
