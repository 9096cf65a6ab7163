use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ollama_chat_relay::{config::Config, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env().context("loading configuration")?;
    let state = Arc::new(AppState::new(&config));

    let app = routes::build_app(state, &config.static_dir);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;

    tracing::info!(
        ollama = %config.ollama_url,
        model = %config.default_model,
        "relay listening on http://localhost:{}",
        config.port
    );
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
