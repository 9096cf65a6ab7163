// src/config.rs
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub ollama_url: String,
    pub default_model: String,
    pub static_dir: String,
    pub list_timeout: Duration,
    pub generate_timeout: Duration,
    pub session_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            static_dir: "static".to_string(),
            list_timeout: Duration::from_secs(5),
            generate_timeout: Duration::from_secs(60),
            session_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(host) = get("RELAY_HOST") {
            config.host = host;
        }
        if let Some(port) = get("RELAY_PORT") {
            config.port = parse("RELAY_PORT", &port)?;
        }
        if let Some(url) = get("OLLAMA_URL") {
            config.ollama_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = get("OLLAMA_MODEL") {
            config.default_model = model;
        }
        if let Some(dir) = get("RELAY_STATIC_DIR") {
            config.static_dir = dir;
        }
        if let Some(secs) = get("OLLAMA_LIST_TIMEOUT_SECS") {
            config.list_timeout = Duration::from_secs(parse("OLLAMA_LIST_TIMEOUT_SECS", &secs)?);
        }
        if let Some(secs) = get("OLLAMA_GENERATE_TIMEOUT_SECS") {
            config.generate_timeout =
                Duration::from_secs(parse("OLLAMA_GENERATE_TIMEOUT_SECS", &secs)?);
        }
        if let Some(secs) = get("RELAY_SESSION_TTL_SECS") {
            config.session_ttl = Duration::from_secs(parse("RELAY_SESSION_TTL_SECS", &secs)?);
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
