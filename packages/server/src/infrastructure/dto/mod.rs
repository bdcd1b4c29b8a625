//! Data Transfer Objects (DTOs).
//!
//! Wire frames of the WebSocket channels live in `domain::frame`; only the
//! JSON shapes of the HTTP endpoints are defined here.

pub mod http;
