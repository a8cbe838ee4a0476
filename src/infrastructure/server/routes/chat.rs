use super::super::dto::{ChatRequest, ChatResponse, ErrorResponse};
use super::super::error::ApiError;
use super::super::state::ServerState;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use std::sync::Arc;
use tracing::{error, info};

#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Conversation handled", body = ChatResponse),
        (status = 400, description = "Body is malformed, or the conversation is empty or has no user message", body = ErrorResponse),
        (status = 502, description = "Language model or tool failed", body = ErrorResponse)
    )
)]
pub async fn chat_handler(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(payload) = payload?;
    info!(messages = payload.messages.len(), "Received /api/chat request");

    let outcome = state
        .orchestrator()
        .handle(&payload.messages)
        .await
        .map_err(|err| {
            error!(%err, "Chat request failed");
            ApiError::from(err)
        })?;

    Ok(Json(ChatResponse {
        response: outcome.response,
        decision: outcome.decision,
        plan: outcome.plan,
        steps: outcome.steps,
    }))
}
