use super::types::{Completion, CompletionRequest, GatewayError};
use async_trait::async_trait;

/// Chat-completion capability shared by every stage and tool.
///
/// Implementations are created once at startup and injected as
/// `Arc<dyn CompletionGateway>`.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    /// Model used when a request does not name one
    fn default_model(&self) -> &str;

    /// Send one completion request
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GatewayError>;
}
