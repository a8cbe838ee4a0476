//! Completion calls constrained to a JSON object shape.

use crate::infrastructure::gateway::{
    CompletionGateway, CompletionRequest, GatewayError, OutputSchema, SchemaError,
};
use crate::types::ChatMessage;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum StructuredError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Send `messages` with `schema` as the output constraint and decode the
/// single returned choice.
pub async fn request_structured<T: DeserializeOwned>(
    gateway: &dyn CompletionGateway,
    messages: Vec<ChatMessage>,
    schema: &OutputSchema,
) -> Result<T, StructuredError> {
    let request = CompletionRequest::new(messages).with_schema(schema.clone());
    let content = gateway.complete(request).await?.into_single()?;
    debug!(schema = schema.name(), content = content.as_str(), "Structured completion received");
    Ok(schema.decode(&content)?)
}
