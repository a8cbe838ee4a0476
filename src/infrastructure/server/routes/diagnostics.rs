use super::super::dto::{ErrorResponse, ExpressionQuery, PromptQuery};
use super::super::error::ApiError;
use super::super::state::ServerState;
use crate::application::orchestrator::{ExecutionPlan, ToolResponse};
use crate::application::tools::{ToolName, ToolOutput, ValuesCache};
use crate::types::ChatMessage;
use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use std::sync::Arc;
use tracing::{debug, error};

fn single_prompt(text: &str, field: &str) -> Result<Vec<ChatMessage>, ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::bad_request(format!("{field} cannot be empty")));
    }
    Ok(vec![ChatMessage::user(text)])
}

#[utoipa::path(
    get,
    path = "/api/execution-plan",
    tag = "diagnostics",
    params(PromptQuery),
    responses(
        (status = 200, description = "Plan generated for the prompt", body = ExecutionPlan),
        (status = 400, description = "Prompt is missing or empty", body = ErrorResponse),
        (status = 502, description = "Planning stage failed", body = ErrorResponse)
    )
)]
pub async fn execution_plan_handler(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<PromptQuery>, QueryRejection>,
) -> Result<Json<ExecutionPlan>, ApiError> {
    let Query(query) = query?;
    let conversation = single_prompt(&query.prompt, "prompt")?;
    let plan = state.orchestrator().plan(&conversation).await.map_err(|err| {
        error!(%err, "Execution plan request failed");
        ApiError::from(err)
    })?;
    debug!(steps = plan.tools.len(), "Execution plan generated");
    Ok(Json(plan))
}

#[utoipa::path(
    get,
    path = "/api/use-tool",
    tag = "diagnostics",
    params(PromptQuery),
    responses(
        (status = 200, description = "Decision for the prompt", body = ToolResponse),
        (status = 400, description = "Prompt is missing or empty", body = ErrorResponse),
        (status = 502, description = "Decision stage failed", body = ErrorResponse)
    )
)]
pub async fn use_tool_handler(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<PromptQuery>, QueryRejection>,
) -> Result<Json<ToolResponse>, ApiError> {
    let Query(query) = query?;
    let conversation = single_prompt(&query.prompt, "prompt")?;
    let decision = state
        .orchestrator()
        .decide(&conversation)
        .await
        .map_err(|err| {
            error!(%err, "Decision request failed");
            ApiError::from(err)
        })?;
    Ok(Json(decision))
}

#[utoipa::path(
    get,
    path = "/api/math",
    tag = "diagnostics",
    params(ExpressionQuery),
    responses(
        (status = 200, description = "Evaluated calculation", body = ToolOutput),
        (status = 400, description = "Expression is missing or empty", body = ErrorResponse),
        (status = 502, description = "Generation or evaluation failed", body = ErrorResponse),
        (status = 503, description = "No math handler is registered", body = ErrorResponse)
    )
)]
pub async fn math_handler(
    State(state): State<Arc<ServerState>>,
    query: Result<Query<ExpressionQuery>, QueryRejection>,
) -> Result<Json<ToolOutput>, ApiError> {
    let Query(query) = query?;
    let conversation = single_prompt(&query.expression, "expression")?;
    let orchestrator = state.orchestrator();
    let handler = orchestrator
        .registry()
        .get(ToolName::GenerateMath)
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "math tool is not available",
            )
        })?;

    let output = handler
        .invoke(&ValuesCache::new(), &conversation)
        .await
        .map_err(|err| {
            error!(%err, "Math request failed");
            ApiError::from(err)
        })?;
    Ok(Json(output))
}
