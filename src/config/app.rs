use super::error::ConfigError;
use super::gateway::GatewayConfig;
use super::math::MathConfig;
use super::orchestrator::OrchestratorConfig;
use super::prompts::PromptSet;
use super::server::ServerSettings;
use std::path::Path;

/// Application configuration loaded from server.toml
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub server: ServerSettings,
    pub orchestrator: OrchestratorConfig,
    pub math: MathConfig,
    pub prompts: PromptSet,
}

impl AppConfig {
    /// Load configuration from a file path (or default path if None)
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::loader::load_config(path)
    }

    /// Parse configuration from TOML text. Relative prompt directories are
    /// resolved against the current directory.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        super::loader::parse_config(content, Path::new("<inline>"))
    }
}
