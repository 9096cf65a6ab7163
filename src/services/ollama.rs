//! HTTP client for the local Ollama server.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::message::StatusReport;
use crate::services::model_selection::SelectedModel;

const TEMPERATURE: f32 = 0.7;
const NUM_PREDICT: u32 = 1000;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Ollama answered with status {0}")]
    Status(StatusCode),
    #[error("No response from Ollama")]
    NoResponse,
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerateOptions,
}

#[derive(Debug, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

/// Body of `GET /api/tags`.
#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagModel>,
}

#[derive(Debug, Deserialize)]
pub struct TagModel {
    pub name: String,
}

// Status only counts entries, so their shape doesn't matter.
#[derive(Debug, Deserialize)]
struct TagsCount {
    #[serde(default)]
    models: Vec<IgnoredAny>,
}

pub fn build_prompt(message: &str) -> String {
    format!("### User: {}\n### Assistant:", message)
}

/// The failure and its whole cause chain, e.g.
/// `error sending request for url (...): operation timed out`.
fn describe(err: RelayError) -> String {
    format!("{:#}", anyhow::Error::from(err))
}

/// Flatten a relay outcome into the reply text sent to the browser.
pub fn reply_text(outcome: Result<String, RelayError>) -> String {
    match outcome {
        Ok(text) => text,
        Err(e) => format!("Error: {}", describe(e)),
    }
}

#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    selected: SelectedModel,
    list_timeout: Duration,
    generate_timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.ollama_url.clone(),
            selected: SelectedModel::new(config.default_model.clone()),
            list_timeout: config.list_timeout,
            generate_timeout: config.generate_timeout,
        }
    }

    pub fn selected_model(&self) -> &SelectedModel {
        &self.selected
    }

    /// Names of the installed models, in the order Ollama lists them.
    /// Any failure yields an empty list.
    pub async fn list_models(&self) -> Vec<String> {
        match self.fetch_tags::<TagsResponse>().await {
            Ok(tags) => tags.models.into_iter().map(|m| m.name).collect(),
            Err(e) => {
                tracing::debug!(error = %e, "listing models failed");
                Vec::new()
            }
        }
    }

    pub async fn check_status(&self) -> StatusReport {
        match self.fetch_tags::<TagsCount>().await {
            Ok(tags) => StatusReport::running(tags.models.len()),
            Err(e) => {
                tracing::debug!(error = %e, "Ollama unreachable");
                StatusReport::offline()
            }
        }
    }

    /// Send `message` with the process-wide model, switching to `model` first
    /// when one is given. Failures come back as text starting with `Error: `.
    pub async fn send_message(&self, message: &str, model: Option<&str>) -> String {
        let model = self.selected.select(model).await;
        self.send_with_model(&model, message).await
    }

    /// Like `send_message`, with the model already resolved by the caller.
    pub async fn send_with_model(&self, model: &str, message: &str) -> String {
        let outcome = self.generate(model, message).await;
        let failed = outcome.is_err();
        let text = reply_text(outcome);
        if failed {
            tracing::warn!(reply = %text, %model, "relay to Ollama failed");
        }
        text
    }

    pub async fn generate(&self, model: &str, message: &str) -> Result<String, RelayError> {
        let request = GenerateRequest {
            model,
            prompt: build_prompt(message),
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
                num_predict: NUM_PREDICT,
            },
        };

        let url = format!("{}/api/generate", self.base_url);
        tracing::info!(%model, "relaying message to Ollama");

        let body: GenerateResponse = self
            .http
            .post(&url)
            .timeout(self.generate_timeout)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        body.response
            .map(|text| text.trim().to_string())
            .ok_or(RelayError::NoResponse)
    }

    async fn fetch_tags<T: DeserializeOwned>(&self) -> Result<T, RelayError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .http
            .get(&url)
            .timeout(self.list_timeout)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(RelayError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}
