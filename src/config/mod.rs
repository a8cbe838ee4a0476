pub mod app;
pub mod error;
pub mod gateway;
pub mod loader;
pub mod math;
pub mod orchestrator;
pub mod prompts;
pub mod server;

pub use crate::constants::CONFIG_PATH;

pub use app::AppConfig;
pub use error::ConfigError;
pub use gateway::GatewayConfig;
pub use math::MathConfig;
pub use orchestrator::{OrchestratorConfig, PlanPolicy};
pub use prompts::{PromptKind, PromptSet};
pub use server::ServerSettings;
