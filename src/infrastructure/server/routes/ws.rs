use super::super::error::ApiError;
use super::super::state::ServerState;
use crate::application::orchestrator::Orchestrator;
use axum::extract::State;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::http::header::{HOST, ORIGIN};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use futures::StreamExt;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Browsers always send `Origin`; it must be this host or an allowed origin.
fn origin_permitted(state: &ServerState, headers: &HeaderMap) -> bool {
    let Some(origin) = headers.get(ORIGIN).and_then(|value| value.to_str().ok()) else {
        return true;
    };
    let same_host = headers
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|host| origin.split_once("://").map(|(_, rest)| rest) == Some(host));
    same_host || state.settings().origin_allowed(origin)
}

pub async fn ws_handler(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    if !origin_permitted(&state, &headers) {
        warn!(origin = ?headers.get(ORIGIN), "Rejecting WebSocket from disallowed origin");
        return ApiError::new(StatusCode::FORBIDDEN, "origin not allowed").into_response();
    }
    let upgrade = match upgrade {
        Ok(upgrade) => upgrade,
        Err(rejection) => return rejection.into_response(),
    };

    let orchestrator = state.orchestrator();
    upgrade
        .on_upgrade(move |socket| handle_socket(socket, orchestrator))
        .into_response()
}

async fn handle_socket(mut socket: WebSocket, orchestrator: Arc<Orchestrator>) {
    info!("WebSocket connection established");

    while let Some(msg) = socket.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                debug!(bytes = text.as_str().len(), "Received chat frame");
                let reply = match orchestrator.handle_raw(text.as_str()).await {
                    Ok(outcome) => outcome.response,
                    Err(err) => {
                        error!(%err, "Chat frame failed");
                        json!({ "error": err.user_message() }).to_string()
                    }
                };
                if socket.send(Message::Text(reply.into())).await.is_err() {
                    break;
                }
            }
            Ok(Message::Ping(payload)) => {
                if socket.send(Message::Pong(payload)).await.is_err() {
                    break;
                }
            }
            Ok(Message::Close(frame)) => {
                debug!(?frame, "WebSocket closed by client");
                break;
            }
            Ok(Message::Binary(_)) | Ok(Message::Pong(_)) => {}
            Err(err) => {
                error!(?err, "WebSocket error");
                break;
            }
        }
    }

    info!("WebSocket connection closed");
}
