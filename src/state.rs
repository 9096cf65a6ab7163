// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::ollama::OllamaClient;
use crate::services::session_manager::SessionManager;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub ollama: OllamaClient,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            ollama: OllamaClient::new(config),
            sessions: SessionManager::new(config.session_ttl),
        }
    }
}
