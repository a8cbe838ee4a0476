//! Gateway types - Request, Completion, and Error types

use super::schema::OutputSchema;
use crate::types::ChatMessage;
use reqwest::StatusCode;
use thiserror::Error;

/// Completion request for the gateway
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    /// Structured-output constraint; `None` requests free text
    pub schema: Option<OutputSchema>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            schema: None,
        }
    }

    pub fn with_schema(mut self, schema: OutputSchema) -> Self {
        self.schema = Some(schema);
        self
    }
}

/// Completion choices returned by the gateway, in provider order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub choices: Vec<String>,
}

impl Completion {
    pub fn new(choices: Vec<String>) -> Self {
        Self { choices }
    }

    pub fn single(content: impl Into<String>) -> Self {
        Self {
            choices: vec![content.into()],
        }
    }

    /// The only choice; any other count is an invalid response.
    pub fn into_single(self) -> Result<String, GatewayError> {
        let count = self.choices.len();
        if count != 1 {
            return Err(GatewayError::ChoiceCount { count });
        }
        self.choices
            .into_iter()
            .next()
            .ok_or(GatewayError::ChoiceCount { count })
    }

    /// The last choice, used for free-text answers.
    pub fn into_last(self) -> Result<String, GatewayError> {
        self.choices
            .into_iter()
            .last()
            .ok_or(GatewayError::ChoiceCount { count: 0 })
    }
}

/// Gateway errors
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("completion gateway requires an API key in environment variable '{env}'")]
    MissingApiKey { env: String },
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("network error calling completion gateway: {0}")]
    Network(#[source] reqwest::Error),
    #[error("completion gateway returned invalid response: {reason}")]
    InvalidResponse { reason: String },
    #[error("expected exactly one completion choice, received {count}")]
    ChoiceCount { count: usize },
}

impl GatewayError {
    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Short message suitable for end users
    pub fn user_message(&self) -> String {
        match self {
            GatewayError::MissingApiKey { .. } => {
                "The assistant is not configured with an API key.".to_string()
            }
            GatewayError::Client(_) => "The assistant could not start its model client.".to_string(),
            GatewayError::Network(source) => {
                if source.is_connect() {
                    "Could not reach the language model service.".to_string()
                } else if source.is_timeout() {
                    "The language model service took too long to answer.".to_string()
                } else if let Some(status) = source.status() {
                    match status {
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            "The language model service rejected our credentials.".to_string()
                        }
                        StatusCode::TOO_MANY_REQUESTS => {
                            "The language model service is rate limiting requests.".to_string()
                        }
                        StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                            "The language model service is unavailable.".to_string()
                        }
                        _ => format!("The language model request failed ({}).", status.as_u16()),
                    }
                } else {
                    "Network error while contacting the language model.".to_string()
                }
            }
            GatewayError::InvalidResponse { .. } | GatewayError::ChoiceCount { .. } => {
                "The language model returned an unexpected response.".to_string()
            }
        }
    }
}
