use crate::constants::{DEFAULT_MATH_COMMAND, DEFAULT_MATH_TEMPLATE, DEFAULT_MATH_TIMEOUT_MS};
use serde::Deserialize;
use std::time::Duration;

/// Settings for the expression evaluator subprocess.
///
/// ```toml
/// [math]
/// command = "node"
/// args = ["-e"]
/// timeout_ms = 5000
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MathConfig {
    pub command: String,
    /// Arguments placed before the wrapped expression
    pub args: Vec<String>,
    /// Wrapper source; `{expression}` is replaced by the generated expression
    pub template: String,
    pub timeout: Duration,
}

impl Default for MathConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_MATH_COMMAND.to_string(),
            args: vec!["-e".to_string()],
            template: DEFAULT_MATH_TEMPLATE.to_string(),
            timeout: Duration::from_millis(DEFAULT_MATH_TIMEOUT_MS),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawMath {
    pub(super) command: Option<String>,
    pub(super) args: Option<Vec<String>>,
    pub(super) template: Option<String>,
    pub(super) timeout_ms: Option<u64>,
}
