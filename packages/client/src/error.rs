//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server refused the WebSocket handshake (e.g. origin not allowed)
    #[error("Handshake rejected with HTTP status {0}")]
    HandshakeRejected(u16),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
