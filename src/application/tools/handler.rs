use super::cache::{ToolOutput, ValuesCache};
use super::error::ToolError;
use super::name::ToolName;
use crate::application::structured::StructuredError;
use crate::types::ChatMessage;
use async_trait::async_trait;

/// A callable tool.
///
/// Handlers receive the results cached by earlier steps of the same plan
/// and the full conversation. They must not assume any earlier entry is
/// present.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    fn name(&self) -> ToolName;

    async fn invoke(
        &self,
        cache: &ValuesCache,
        conversation: &[ChatMessage],
    ) -> Result<ToolOutput, ToolError>;
}

impl From<StructuredError> for ToolError {
    fn from(err: StructuredError) -> Self {
        match err {
            StructuredError::Gateway(err) => ToolError::Gateway(err),
            StructuredError::Schema(err) => ToolError::Schema(err),
        }
    }
}
