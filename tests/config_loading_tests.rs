// Config loading tests - testing AppConfig::load error handling
//
// Tests focused on configuration file loading, defaults and validation.

use hcm_assistant::config::{AppConfig, ConfigError, PlanPolicy, PromptKind};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::tempdir;

fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("server.toml");
    fs::write(&path, content).expect("Failed to write config");
    path
}

#[test]
fn returns_error_when_file_not_found() {
    let result = AppConfig::load(Some(Path::new("/nonexistent/path/server.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

#[test]
fn empty_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(dir.path(), "");

    let config = AppConfig::load(Some(&path)).expect("load");
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.orchestrator.plan_policy, PlanPolicy::Advisory);
    assert_eq!(config.gateway.model, "gpt-4o-mini");
    assert_eq!(config.math.timeout, Duration::from_secs(5));
}

#[test]
fn parses_every_section() {
    let dir = tempdir().expect("tempdir");
    let path = write_config(
        dir.path(),
        r#"
[gateway]
endpoint = "http://127.0.0.1:9000"
model = "local-model"
timeout_secs = 5

[server]
bind = "127.0.0.1:3000"
allowed_origins = ["http://example.test"]

[orchestrator]
plan_policy = "strict"

[math]
command = "deno"
args = ["eval"]
timeout_ms = 250
"#,
    );

    let config = AppConfig::load(Some(&path)).expect("load");
    assert_eq!(config.gateway.endpoint, "http://127.0.0.1:9000");
    assert_eq!(config.gateway.model, "local-model");
    assert_eq!(config.gateway.timeout, Duration::from_secs(5));
    assert_eq!(config.server.bind.port(), 3000);
    assert!(config.server.origin_allowed("http://example.test"));
    assert_eq!(config.orchestrator.plan_policy, PlanPolicy::Strict);
    assert_eq!(config.math.command, "deno");
    assert_eq!(config.math.args, vec!["eval".to_string()]);
    assert_eq!(config.math.timeout, Duration::from_millis(250));
}

#[test]
fn returns_error_for_invalid_bind() {
    let result = AppConfig::from_toml_str("[server]\nbind = \"not-an-address\"\n");
    assert!(matches!(result, Err(ConfigError::InvalidBind { value }) if value == "not-an-address"));
}

#[test]
fn returns_error_for_zero_timeouts() {
    let gateway = AppConfig::from_toml_str("[gateway]\ntimeout_secs = 0\n");
    assert!(matches!(
        gateway,
        Err(ConfigError::ZeroTimeout {
            field: "gateway.timeout_secs"
        })
    ));

    let math = AppConfig::from_toml_str("[math]\ntimeout_ms = 0\n");
    assert!(matches!(
        math,
        Err(ConfigError::ZeroTimeout {
            field: "math.timeout_ms"
        })
    ));
}

#[test]
fn returns_error_when_model_empty() {
    let result = AppConfig::from_toml_str("[gateway]\nmodel = \"  \"\n");
    assert!(matches!(result, Err(ConfigError::MissingModel)));
}

#[test]
fn returns_error_when_template_lacks_placeholder() {
    let result = AppConfig::from_toml_str("[math]\ntemplate = \"console.log(1)\"\n");
    assert!(matches!(result, Err(ConfigError::MissingExpressionPlaceholder)));
}

#[test]
fn returns_error_for_unknown_plan_policy() {
    let result = AppConfig::from_toml_str("[orchestrator]\nplan_policy = \"sometimes\"\n");
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn prompt_directory_overrides_assets() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("planner.md"), "custom catalogue\n").expect("write prompt");
    let content = format!("[prompts]\ndir = {:?}\n", dir.path().display().to_string());
    let path = write_config(dir.path(), &content);

    let config = AppConfig::load(Some(&path)).expect("load");
    assert_eq!(config.prompts.get(PromptKind::Planner), "custom catalogue");
    assert_ne!(config.prompts.get(PromptKind::Persona), "custom catalogue");
}
