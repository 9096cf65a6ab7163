// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;

/// Above this many sessions, a lookup also drops every idle one.
const SWEEP_THRESHOLD: usize = 256;

#[derive(Clone, Debug)]
pub struct Session {
    pub id: String,
    pub model: Option<String>,
    pub last_active: Instant,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), model: None, last_active: Instant::now() }
    }
}

/// Per-client model choices, keyed by the `session_id` a client sends.
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Record `requested` for the session if non-empty and return the session's
    /// model, or `None` when it never chose one. A session idle past the ttl
    /// starts over.
    pub async fn select_model(&self, session_id: &str, requested: Option<&str>) -> Option<String> {
        let mut guard = self.inner.write().await;
        let now = Instant::now();

        if guard.len() >= SWEEP_THRESHOLD {
            let before = guard.len();
            guard.retain(|_, s| now.duration_since(s.last_active) < self.ttl);
            tracing::debug!(removed = before - guard.len(), "purged idle sessions");
        }

        let session = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id));
        if now.duration_since(session.last_active) >= self.ttl {
            session.model = None;
        }
        session.last_active = now;

        if let Some(model) = requested.filter(|m| !m.is_empty()) {
            session.model = Some(model.to_string());
        }
        session.model.clone()
    }
}
