use super::cache::{ToolOutput, ValuesCache};
use super::error::ToolError;
use super::handler::ToolHandler;
use super::name::ToolName;
use crate::infrastructure::gateway::{CompletionGateway, CompletionRequest};
use crate::types::ChatMessage;
use async_trait::async_trait;
use std::sync::Arc;

/// Writes the final chat reply from the conversation and cached results.
pub struct OutputTool {
    gateway: Arc<dyn CompletionGateway>,
    instruction: String,
}

impl OutputTool {
    pub fn new(gateway: Arc<dyn CompletionGateway>, instruction: impl Into<String>) -> Self {
        Self {
            gateway,
            instruction: instruction.into(),
        }
    }

    fn system_message(&self, cache: &ValuesCache) -> ChatMessage {
        let gathered = if cache.is_empty() {
            "(none)".to_string()
        } else {
            cache.render()
        };
        ChatMessage::system(format!("{}\n{gathered}", self.instruction))
    }
}

#[async_trait]
impl ToolHandler for OutputTool {
    fn name(&self) -> ToolName {
        ToolName::GenerateOutput
    }

    async fn invoke(
        &self,
        cache: &ValuesCache,
        conversation: &[ChatMessage],
    ) -> Result<ToolOutput, ToolError> {
        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(self.system_message(cache));
        messages.extend_from_slice(conversation);

        let reply = self
            .gateway
            .complete(CompletionRequest::new(messages))
            .await?
            .into_last()?;
        Ok(ToolOutput::text(reply))
    }
}
