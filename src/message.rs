// src/message.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    Running,
    Offline,
}

/// Reachability of the backend. `models` is only present when it answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: BackendStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models: Option<usize>,
}

impl StatusReport {
    pub fn running(models: usize) -> Self {
        Self { status: BackendStatus::Running, models: Some(models) }
    }

    pub fn offline() -> Self {
        Self { status: BackendStatus::Offline, models: None }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
