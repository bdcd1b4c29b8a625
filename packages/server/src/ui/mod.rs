//! HTTP and WebSocket surface of the server.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
