//! OpenAI-compatible gateway implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::base::HttpClientBase;
use crate::config::GatewayConfig;
use crate::infrastructure::gateway::adapter::MessageAdapter;
use crate::infrastructure::gateway::traits::CompletionGateway;
use crate::infrastructure::gateway::types::{Completion, CompletionRequest, GatewayError};

/// Gateway for OpenAI-compatible chat-completion endpoints
#[derive(Clone)]
pub struct OpenAiGateway {
    base: HttpClientBase,
    api_path: String,
    model: String,
}

impl OpenAiGateway {
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            base: HttpClientBase::new(
                config.endpoint.clone(),
                config.api_key_env.clone(),
                config.timeout,
            )?,
            api_path: config.api_path.clone(),
            model: config.model.clone(),
        })
    }

    /// True when an API key was found at construction
    pub fn has_api_key(&self) -> bool {
        self.base.api_key.is_some()
    }
}

#[async_trait]
impl CompletionGateway for OpenAiGateway {
    fn default_model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError> {
        let url = self.base.build_url(&self.api_path);
        let schema_name = request.schema.as_ref().map(|s| s.name().to_string());

        let payload = OpenAiRequest {
            model: self.model.clone(),
            messages: MessageAdapter::to_openai_format(&request.messages),
            response_format: request.schema.as_ref().map(|s| s.response_format()),
        };

        info!(
            model = self.model.as_str(),
            messages = request.messages.len(),
            schema = schema_name.as_deref(),
            "Sending completion request"
        );

        let response: OpenAiResponse = self.base.post_with_bearer(&url, &payload).await?;
        debug!(choices = response.choices.len(), "Received completion response");

        let choices = response
            .choices
            .into_iter()
            .map(|choice| {
                choice
                    .message
                    .and_then(|m| m.content)
                    .ok_or_else(|| GatewayError::invalid_response("choice without content"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Completion::new(choices))
    }
}

#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: Option<OpenAiMessage>,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}
