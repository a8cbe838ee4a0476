//! Application constants
//!
//! Single source of truth for paths and defaults.

/// Default configuration file path
pub const CONFIG_PATH: &str = "config/server.toml";

/// Environment files loaded before configuration, in order
pub const ENV_PATHS: [&str; 2] = ["config/.env", ".env"];

pub const DEFAULT_GATEWAY_ENDPOINT: &str = "https://api.openai.com";
pub const DEFAULT_GATEWAY_API_PATH: &str = "/v1/chat/completions";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_GATEWAY_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:8080", "http://127.0.0.1:8080"];

pub const DEFAULT_MATH_COMMAND: &str = "node";
pub const DEFAULT_MATH_TIMEOUT_MS: u64 = 5_000;

/// Placeholder replaced by the generated expression in the math wrapper
pub const EXPRESSION_PLACEHOLDER: &str = "{expression}";

/// Wraps a generated expression so the runtime prints its value, or exits
/// non-zero when evaluation throws.
pub const DEFAULT_MATH_TEMPLATE: &str = r#"
try {
    console.log({expression});
} catch (error) {
    console.error(error);
    process.exit(1);
}
"#;
