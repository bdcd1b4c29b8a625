//! Shared application state.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    usecase::{ChatRouter, MovementRouter},
};

/// Shared application state
pub struct AppState {
    /// チャットチャンネル
    pub chat: Arc<ChatRouter>,
    /// 移動チャンネル
    pub movement: Arc<MovementRouter>,
    pub config: ServerConfig,
}
