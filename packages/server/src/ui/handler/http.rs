//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::ChannelStateDto,
    ui::state::AppState,
    usecase::{ChannelHandler, ChatRouter, MovementRouter},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint to inspect the connections and roster of a channel
pub async fn debug_channel_state(
    State(state): State<Arc<AppState>>,
    Path(channel): Path<String>,
) -> Result<Json<ChannelStateDto>, StatusCode> {
    let hub = match channel.as_str() {
        ChatRouter::CHANNEL => state.chat.hub(),
        MovementRouter::CHANNEL => state.movement.hub(),
        _ => return Err(StatusCode::NOT_FOUND),
    };

    let connections = hub.connections().await;
    let roster = hub.roster().await;
    Ok(Json(ChannelStateDto::new(hub.name(), connections, roster)))
}
