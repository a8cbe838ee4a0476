use super::cache::{DisplayMarkup, ToolOutput, ValuesCache};
use super::error::ToolError;
use super::handler::ToolHandler;
use super::name::ToolName;
use crate::application::structured::request_structured;
use crate::infrastructure::gateway::{CompletionGateway, OutputSchema};
use crate::types::{ChatMessage, latest_user_prompt};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct GeneratedMarkup {
    /// HTML body content displaying the data
    markup: String,
    /// Explanation of the layout choices.
    context: String,
}

fn markup_schema() -> OutputSchema {
    OutputSchema::of::<GeneratedMarkup>(
        "GenerateDisplayHtml",
        "Generate the HTML body content needed to display the data in the user prompt",
    )
}

/// Generates body markup for the chat page's display pane.
pub struct DisplayTool {
    gateway: Arc<dyn CompletionGateway>,
    instruction: String,
}

impl DisplayTool {
    pub fn new(gateway: Arc<dyn CompletionGateway>, instruction: impl Into<String>) -> Self {
        Self {
            gateway,
            instruction: instruction.into(),
        }
    }

    pub async fn generate(&self, description: &str) -> Result<DisplayMarkup, ToolError> {
        let messages = vec![
            ChatMessage::system(self.instruction.clone()),
            ChatMessage::user(description),
        ];
        let generated: GeneratedMarkup =
            request_structured(self.gateway.as_ref(), messages, &markup_schema()).await?;
        Ok(DisplayMarkup {
            markup: generated.markup,
            context: generated.context,
        })
    }
}

/// The user's request followed by whatever earlier steps produced.
fn describe(prompt: &str, cache: &ValuesCache) -> String {
    if cache.is_empty() {
        prompt.to_string()
    } else {
        format!("{prompt}\n\nData to display:\n{}", cache.render())
    }
}

#[async_trait]
impl ToolHandler for DisplayTool {
    fn name(&self) -> ToolName {
        ToolName::GenerateDisplayHtml
    }

    async fn invoke(
        &self,
        cache: &ValuesCache,
        conversation: &[ChatMessage],
    ) -> Result<ToolOutput, ToolError> {
        let prompt = latest_user_prompt(conversation).ok_or(ToolError::MissingPrompt)?;
        let display = self.generate(&describe(prompt, cache)).await?;
        Ok(ToolOutput::Display(display))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tools::cache::MathResult;

    #[test]
    fn description_includes_cached_results() {
        let mut cache = ValuesCache::new();
        assert_eq!(describe("show it", &cache), "show it");

        let vacancy = cache.vacancy(ToolName::GenerateMath).expect("empty cache");
        cache.fill(
            vacancy,
            ToolOutput::Math(MathResult {
                equation: "2*3".into(),
                context: String::new(),
                value: "6".into(),
            }),
        );
        let description = describe("show it", &cache);
        assert!(description.starts_with("show it\n\nData to display:\n"));
        assert!(description.contains("value: 6"));
    }
}
