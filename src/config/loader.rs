use super::CONFIG_PATH;
use super::error::ConfigError;
use super::gateway::{GatewayConfig, RawGateway};
use super::math::{MathConfig, RawMath};
use super::orchestrator::{OrchestratorConfig, RawOrchestrator};
use super::prompts::PromptSet;
use super::server::{RawServer, ServerSettings};
use super::AppConfig;
use crate::constants::{ENV_PATHS, EXPRESSION_PLACEHOLDER};
use dotenvy::from_filename;
use serde::Deserialize;
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tracing::{debug, info};

static ENV_LOADER: Once = Once::new();

/// Raw configuration structure for deserialization from TOML
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    gateway: RawGateway,
    #[serde(default)]
    server: RawServer,
    #[serde(default)]
    orchestrator: RawOrchestrator,
    #[serde(default)]
    math: RawMath,
    #[serde(default)]
    prompts: RawPrompts,
}

#[derive(Debug, Deserialize, Default)]
struct RawPrompts {
    dir: Option<String>,
}

/// Ensures environment variables are loaded from the known `.env` files
pub fn ensure_env_loaded() {
    ENV_LOADER.call_once(|| {
        for path in ENV_PATHS {
            if from_filename(path).is_ok() {
                debug!(path, "Loaded environment file");
            }
        }
    });
}

/// Load and validate configuration.
///
/// Without an explicit path a missing default file yields the built-in
/// defaults; an explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    ensure_env_loaded();
    match path {
        Some(path) => read_config(path),
        None => {
            let default_path = Path::new(CONFIG_PATH);
            if default_path.exists() {
                read_config(default_path)
            } else {
                info!(
                    path = CONFIG_PATH,
                    "Configuration file absent, using built-in defaults"
                );
                Ok(AppConfig::default())
            }
        }
    }
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    debug!(path = %path.display(), "Reading server configuration file");

    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_config(&content, path)
}

pub(super) fn parse_config(content: &str, path: &Path) -> Result<AppConfig, ConfigError> {
    let parsed: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    validate_and_build(parsed)
}

fn validate_and_build(parsed: RawConfig) -> Result<AppConfig, ConfigError> {
    let gateway = build_gateway(parsed.gateway)?;
    let server = build_server(parsed.server)?;
    let math = build_math(parsed.math)?;
    let orchestrator = OrchestratorConfig {
        plan_policy: parsed.orchestrator.plan_policy.unwrap_or_default(),
    };
    let prompts_dir = parsed.prompts.dir.as_deref().map(expand_path).transpose()?;
    let prompts = PromptSet::load(prompts_dir.as_deref())?;

    Ok(AppConfig {
        gateway,
        server,
        orchestrator,
        math,
        prompts,
    })
}

fn build_gateway(raw: RawGateway) -> Result<GatewayConfig, ConfigError> {
    let defaults = GatewayConfig::default();
    let endpoint = raw.endpoint.unwrap_or(defaults.endpoint);
    if endpoint.trim().is_empty() {
        return Err(ConfigError::MissingEndpoint);
    }
    let model = raw.model.unwrap_or(defaults.model);
    if model.trim().is_empty() {
        return Err(ConfigError::MissingModel);
    }
    let timeout = match raw.timeout_secs {
        Some(0) => {
            return Err(ConfigError::ZeroTimeout {
                field: "gateway.timeout_secs",
            });
        }
        Some(secs) => Duration::from_secs(secs),
        None => defaults.timeout,
    };

    Ok(GatewayConfig {
        endpoint,
        api_path: raw.api_path.unwrap_or(defaults.api_path),
        api_key_env: raw.api_key_env.unwrap_or(defaults.api_key_env),
        model,
        timeout,
    })
}

fn build_server(raw: RawServer) -> Result<ServerSettings, ConfigError> {
    let defaults = ServerSettings::default();
    let bind = match raw.bind {
        Some(value) => value
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidBind { value })?,
        None => defaults.bind,
    };
    let static_dir = match raw.static_dir {
        Some(dir) => expand_path(&dir)?,
        None => defaults.static_dir,
    };

    Ok(ServerSettings {
        bind,
        allowed_origins: raw.allowed_origins.unwrap_or(defaults.allowed_origins),
        static_dir,
    })
}

fn build_math(raw: RawMath) -> Result<MathConfig, ConfigError> {
    let defaults = MathConfig::default();
    let template = raw.template.unwrap_or(defaults.template);
    if !template.contains(EXPRESSION_PLACEHOLDER) {
        return Err(ConfigError::MissingExpressionPlaceholder);
    }
    let timeout = match raw.timeout_ms {
        Some(0) => {
            return Err(ConfigError::ZeroTimeout {
                field: "math.timeout_ms",
            });
        }
        Some(ms) => Duration::from_millis(ms),
        None => defaults.timeout,
    };

    Ok(MathConfig {
        command: raw.command.unwrap_or(defaults.command),
        args: raw.args.unwrap_or(defaults.args),
        template,
        timeout,
    })
}

fn expand_path(value: &str) -> Result<PathBuf, ConfigError> {
    shellexpand::full(value)
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|err| ConfigError::PathExpansion {
            value: value.to_string(),
            message: err.to_string(),
        })
}
