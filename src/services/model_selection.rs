use std::sync::Arc;
use tokio::sync::RwLock;

/// The model used when a chat request names none. Shared by every clone;
/// last writer wins.
#[derive(Debug, Clone)]
pub struct SelectedModel {
    inner: Arc<RwLock<String>>,
}

impl SelectedModel {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial.into())),
        }
    }

    pub async fn get(&self) -> String {
        self.inner.read().await.clone()
    }

    /// Adopt `requested` if it is non-empty, then return the active model.
    pub async fn select(&self, requested: Option<&str>) -> String {
        match requested {
            Some(model) if !model.is_empty() => {
                let mut guard = self.inner.write().await;
                if *guard != model {
                    tracing::info!(from = %guard.as_str(), to = %model, "selected model changed");
                    *guard = model.to_string();
                }
                guard.clone()
            }
            _ => self.get().await,
        }
    }
}
