//! # Gateway Configuration
//!
//! Connection settings for the OpenAI-compatible chat-completion endpoint.
//!
//! ```toml
//! [gateway]
//! endpoint = "https://api.openai.com"
//! api_path = "/v1/chat/completions"
//! api_key_env = "OPENAI_API_KEY"
//! model = "gpt-4o-mini"
//! timeout_secs = 60
//! ```

use crate::constants::{
    DEFAULT_API_KEY_ENV, DEFAULT_GATEWAY_API_PATH, DEFAULT_GATEWAY_ENDPOINT,
    DEFAULT_GATEWAY_TIMEOUT_SECS, DEFAULT_MODEL,
};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Base URL of the completion service
    pub endpoint: String,
    /// Path appended to `endpoint` for chat completions
    pub api_path: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Model identifier sent with every request
    pub model: String,
    pub timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GATEWAY_ENDPOINT.to_string(),
            api_path: DEFAULT_GATEWAY_API_PATH.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_GATEWAY_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawGateway {
    pub(super) endpoint: Option<String>,
    pub(super) api_path: Option<String>,
    pub(super) api_key_env: Option<String>,
    pub(super) model: Option<String>,
    pub(super) timeout_secs: Option<u64>,
}
