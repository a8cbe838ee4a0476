use crate::application::structured::StructuredError;
use crate::application::tools::{ToolError, ToolName};
use crate::infrastructure::gateway::{GatewayError, SchemaError};
use std::fmt;
use thiserror::Error;

/// Stage of a request that issued a structured completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decision,
    Planning,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Decision => f.write_str("decision"),
            Stage::Planning => f.write_str("planning"),
        }
    }
}

/// An execution plan that cannot be run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("tools array is empty")]
    Empty,
    #[error("'{tool}' is scheduled twice in a row (steps {first} and {second})")]
    ConsecutiveDuplicate {
        tool: String,
        first: usize,
        second: usize,
    },
}

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("conversation contains no messages")]
    EmptyConversation,
    #[error("conversation contains no user message")]
    MissingPrompt,
    #[error("conversation is not a valid message list: {0}")]
    InvalidConversation(#[source] serde_json::Error),
    #[error("{stage} stage failed: {source}")]
    Gateway {
        stage: Stage,
        #[source]
        source: GatewayError,
    },
    #[error("{stage} stage returned malformed output: {source}")]
    Schema {
        stage: Stage,
        #[source]
        source: SchemaError,
    },
    #[error("direct completion failed: {0}")]
    Completion(#[source] GatewayError),
    #[error(transparent)]
    Plan(#[from] PlanError),
    #[error("tool '{tool}' failed: {source}")]
    Handler {
        tool: ToolName,
        #[source]
        source: ToolError,
    },
    #[error("last tool key '{tool}' does not exist")]
    ResultMissing { tool: String },
}

impl OrchestratorError {
    pub(crate) fn from_stage(stage: Stage, err: StructuredError) -> Self {
        match err {
            StructuredError::Gateway(source) => OrchestratorError::Gateway { stage, source },
            StructuredError::Schema(source) => OrchestratorError::Schema { stage, source },
        }
    }

    /// Input errors are the caller's fault; everything else failed upstream.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            OrchestratorError::EmptyConversation
                | OrchestratorError::MissingPrompt
                | OrchestratorError::InvalidConversation(_)
        )
    }

    pub fn user_message(&self) -> String {
        match self {
            OrchestratorError::EmptyConversation | OrchestratorError::MissingPrompt => {
                "Please send a message first.".to_string()
            }
            OrchestratorError::InvalidConversation(_) => {
                "The message could not be read. Expected a JSON list of messages.".to_string()
            }
            OrchestratorError::Gateway { source, .. } | OrchestratorError::Completion(source) => {
                source.user_message()
            }
            OrchestratorError::Schema { .. } => {
                "The language model answered in an unexpected format. Please try again."
                    .to_string()
            }
            OrchestratorError::Plan(PlanError::Empty) => {
                "No steps could be planned for this request.".to_string()
            }
            OrchestratorError::Plan(PlanError::ConsecutiveDuplicate { .. }) => {
                "The generated plan repeated a step and was rejected. Please try again."
                    .to_string()
            }
            OrchestratorError::Handler { tool, source } => {
                format!("Step \"{}\" failed: {}", tool.plan_name(), source.user_message())
            }
            OrchestratorError::ResultMissing { .. } => {
                "The plan finished without producing an answer.".to_string()
            }
        }
    }
}
