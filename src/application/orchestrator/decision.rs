use super::errors::{OrchestratorError, Stage};
use crate::application::structured::request_structured;
use crate::infrastructure::gateway::{CompletionGateway, OutputSchema};
use crate::types::ChatMessage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Whether the request needs tool-assisted execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ToolResponse {
    /// True when tools are needed to answer
    #[serde(rename = "useTool")]
    pub use_tool: bool,
    /// Reasoning behind the decision
    pub context: String,
}

pub fn decision_schema() -> OutputSchema {
    OutputSchema::of::<ToolResponse>(
        "ShouldUseTool",
        "Decide whether answering the conversation requires tools",
    )
}

/// Ask the gateway whether `conversation` needs tools.
///
/// Any failure propagates; there is no fallback to `useTool = false`.
pub async fn should_use_tool(
    gateway: &dyn CompletionGateway,
    instruction: &str,
    conversation: &[ChatMessage],
) -> Result<ToolResponse, OrchestratorError> {
    let mut messages = Vec::with_capacity(conversation.len() + 1);
    messages.push(ChatMessage::system(instruction));
    messages.extend_from_slice(conversation);

    request_structured(gateway, messages, &decision_schema())
        .await
        .map_err(|err| OrchestratorError::from_stage(Stage::Decision, err))
}
