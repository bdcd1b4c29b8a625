//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    usecase::{ChatRouter, MovementRouter},
};

use super::{
    handler::{chat_handler, debug_channel_state, health_check, movement_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Real-time chat and movement server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(ServerConfig::default(), chat, movement);
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// ChatRouter（チャットチャンネル）
    chat: Arc<ChatRouter>,
    /// MovementRouter（移動チャンネル）
    movement: Arc<MovementRouter>,
}

impl Server {
    pub fn new(config: ServerConfig, chat: Arc<ChatRouter>, movement: Arc<MovementRouter>) -> Self {
        Self {
            config,
            chat,
            movement,
        }
    }

    /// Build the axum router with every endpoint
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            chat: self.chat.clone(),
            movement: self.movement.clone(),
            config: self.config.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/chat", get(chat_handler))
            .route("/movement", get(movement_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/debug/channels/{channel}", get(debug_channel_state))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let bind_addr = self.config.bind_addr();
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("officeverse server listening on {}", listener.local_addr()?);
        tracing::info!("Chat channel: ws://{}/chat", bind_addr);
        tracing::info!("Movement channel: ws://{}/movement", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
