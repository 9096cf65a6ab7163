use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, ModelsResponse, StatusReport},
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload?;

    let message = match payload.message.as_deref() {
        Some(m) if !m.is_empty() => m,
        _ => return Err(AppError::BadRequest("No message provided".to_string())),
    };
    let requested = payload.model.as_deref();
    let session_id = payload
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let span = tracing::info_span!("chat", request_id = %Uuid::new_v4(), session = session_id);

    let response = async {
        match session_id {
            // A session keeps its own choice and never touches the process-wide model.
            Some(sid) => {
                let model = match state.sessions.select_model(sid, requested).await {
                    Some(model) => model,
                    None => state.ollama.selected_model().get().await,
                };
                state.ollama.send_with_model(&model, message).await
            }
            None => state.ollama.send_message(message, requested).await,
        }
    }
    .instrument(span)
    .await;

    Ok(Json(ChatResponse { response }))
}

pub async fn models_handler(State(state): State<SharedState>) -> Json<ModelsResponse> {
    Json(ModelsResponse {
        models: state.ollama.list_models().await,
    })
}

// Always 200; reachability is reported in the body.
pub async fn status_handler(State(state): State<SharedState>) -> Json<StatusReport> {
    Json(state.ollama.check_status().await)
}
