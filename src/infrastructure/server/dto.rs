use crate::application::orchestrator::{ExecutionPlan, StepReport, ToolResponse};
use crate::types::ChatMessage;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
    pub decision: ToolResponse,
    pub plan: Option<ExecutionPlan>,
    pub steps: Vec<StepReport>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PromptQuery {
    /// Prompt treated as the latest user message
    pub prompt: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ExpressionQuery {
    /// Calculation described in natural language
    pub expression: String,
}
