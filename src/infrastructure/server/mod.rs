//! HTTP surface: WebSocket chat, REST chat, stage diagnostics, employee
//! CRUD, static files and OpenAPI docs.

mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use dto::{ChatRequest, ChatResponse, ErrorResponse};
pub use error::{ApiError, ServerError};
pub use router::build_router;
pub use state::ServerState;

use std::sync::Arc;

/// Serve until Ctrl-C or SIGTERM.
pub async fn serve(state: Arc<ServerState>) -> Result<(), ServerError> {
    router::serve(state).await
}
