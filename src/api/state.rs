use std::sync::Arc;

use crate::config::AppConfig;
use crate::lobby::Lobby;
use crate::ws::WsManager;

/// Shared application state passed to all handlers via Axum's State extractor.
pub struct AppState {
    pub lobby: Lobby,
    pub ws: Arc<WsManager>,
    pub config: AppConfig,
    pub start_time: std::time::Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(AppState {
            lobby: Lobby::new(config.game_options(), config.code_length),
            ws: WsManager::new(),
            config,
            start_time: std::time::Instant::now(),
        })
    }
}
