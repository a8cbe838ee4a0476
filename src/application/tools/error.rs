use crate::infrastructure::gateway::{GatewayError, SchemaError};
use std::time::Duration;
use thiserror::Error;

/// Failure of the evaluator child process
#[derive(Debug, Error)]
pub enum SubprocessError {
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to wait for '{command}': {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{command}' exited with status {status}: {output}")]
    Failed {
        command: String,
        status: String,
        output: String,
    },
    #[error("'{command}' exited successfully but printed no result")]
    EmptyOutput { command: String },
    #[error("'{command}' did not finish within {timeout:?} and was killed")]
    TimedOut { command: String, timeout: Duration },
}

/// Failure of a resolved tool handler
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Subprocess(#[from] SubprocessError),
    #[error("conversation has no user message to work from")]
    MissingPrompt,
}

impl ToolError {
    pub fn user_message(&self) -> String {
        match self {
            ToolError::Gateway(err) => err.user_message(),
            ToolError::Schema(_) => {
                "The language model answered in an unexpected format.".to_string()
            }
            ToolError::Subprocess(SubprocessError::TimedOut { .. }) => {
                "The calculation took too long and was stopped.".to_string()
            }
            ToolError::Subprocess(_) => "The calculation could not be evaluated.".to_string(),
            ToolError::MissingPrompt => "Please send a message first.".to_string(),
        }
    }
}
