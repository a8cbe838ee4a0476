use super::cache::{MathResult, ToolOutput, ValuesCache};
use super::error::ToolError;
use super::evaluator::ScriptEvaluator;
use super::handler::ToolHandler;
use super::name::ToolName;
use crate::application::structured::request_structured;
use crate::infrastructure::gateway::{CompletionGateway, OutputSchema};
use crate::types::{ChatMessage, latest_user_prompt};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct GeneratedEquation {
    /// JavaScript expression evaluating to the result, without comments or formatting
    equation: String,
    /// Step-by-step explanation of the calculation.
    context: String,
}

fn equation_schema() -> OutputSchema {
    OutputSchema::of::<GeneratedEquation>(
        "generateMathJavascript",
        "Generate a JavaScript (ES6) expression that computes the result of a calculation.",
    )
}

/// Turns a described calculation into an expression and evaluates it.
pub struct MathTool {
    gateway: Arc<dyn CompletionGateway>,
    instruction: String,
    evaluator: ScriptEvaluator,
}

impl MathTool {
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        instruction: impl Into<String>,
        evaluator: ScriptEvaluator,
    ) -> Self {
        Self {
            gateway,
            instruction: instruction.into(),
            evaluator,
        }
    }

    /// Generate and evaluate the expression for `description`.
    pub async fn calculate(&self, description: &str) -> Result<MathResult, ToolError> {
        let messages = vec![
            ChatMessage::system(self.instruction.clone()),
            ChatMessage::user(description),
        ];
        let generated: GeneratedEquation =
            request_structured(self.gateway.as_ref(), messages, &equation_schema()).await?;
        info!(equation = generated.equation.as_str(), "Evaluating generated expression");

        let value = self.evaluator.evaluate(&generated.equation).await?;
        Ok(MathResult {
            equation: generated.equation,
            context: generated.context,
            value,
        })
    }
}

#[async_trait]
impl ToolHandler for MathTool {
    fn name(&self) -> ToolName {
        ToolName::GenerateMath
    }

    async fn invoke(
        &self,
        _cache: &ValuesCache,
        conversation: &[ChatMessage],
    ) -> Result<ToolOutput, ToolError> {
        let description = latest_user_prompt(conversation).ok_or(ToolError::MissingPrompt)?;
        Ok(ToolOutput::Math(self.calculate(description).await?))
    }
}
