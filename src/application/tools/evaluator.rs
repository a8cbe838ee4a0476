//! Expression evaluation in an external interpreter process.

use super::error::SubprocessError;
use crate::config::MathConfig;
use crate::constants::EXPRESSION_PLACEHOLDER;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Runs generated expressions through a scripting runtime.
///
/// The child is killed when the timeout elapses, since `kill_on_drop` is
/// set and the wait future is dropped.
#[derive(Debug, Clone)]
pub struct ScriptEvaluator {
    command: String,
    args: Vec<String>,
    template: String,
    timeout: Duration,
}

impl ScriptEvaluator {
    pub fn new(config: &MathConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            template: config.template.clone(),
            timeout: config.timeout,
        }
    }

    /// Source passed to the interpreter for `expression`
    pub fn wrap(&self, expression: &str) -> String {
        self.template.replace(EXPRESSION_PLACEHOLDER, expression)
    }

    /// Evaluate `expression` and return its trimmed standard output.
    pub async fn evaluate(&self, expression: &str) -> Result<String, SubprocessError> {
        let source = self.wrap(expression);
        let mut command = Command::new(&self.command);
        command
            .args(&self.args)
            .arg(&source)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(command = %self.command, expression, "Spawning evaluator");
        let child = command.spawn().map_err(|source| SubprocessError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        let output = match timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| SubprocessError::Wait {
                command: self.command.clone(),
                source,
            })?,
            Err(_) => {
                warn!(command = %self.command, timeout = ?self.timeout, "Evaluator timed out");
                return Err(SubprocessError::TimedOut {
                    command: self.command.clone(),
                    timeout: self.timeout,
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let combined = [stdout, stderr]
                .into_iter()
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            return Err(SubprocessError::Failed {
                command: self.command.clone(),
                status: output.status.to_string(),
                output: combined,
            });
        }

        if stdout.is_empty() {
            return Err(SubprocessError::EmptyOutput {
                command: self.command.clone(),
            });
        }

        debug!(command = %self.command, result = stdout.as_str(), "Evaluator finished");
        Ok(stdout)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn shell(timeout_ms: u64) -> ScriptEvaluator {
        ScriptEvaluator::new(&MathConfig {
            command: "sh".into(),
            args: vec!["-c".into()],
            template: "{expression}".into(),
            timeout: Duration::from_millis(timeout_ms),
        })
    }

    #[test]
    fn default_template_wraps_expression_in_print() {
        let evaluator = ScriptEvaluator::new(&MathConfig::default());
        let source = evaluator.wrap("113124+9201");
        assert!(source.contains("console.log(113124+9201)"));
        assert!(source.contains("process.exit(1)"));
    }

    #[tokio::test]
    async fn captures_trimmed_stdout() {
        let value = shell(5_000)
            .evaluate("echo '  122325  '")
            .await
            .expect("evaluates");
        assert_eq!(value, "122325");
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_error_with_output() {
        let err = shell(5_000)
            .evaluate("echo boom >&2; exit 3")
            .await
            .unwrap_err();
        match err {
            SubprocessError::Failed { output, .. } => assert_eq!(output, "boom"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn silent_success_is_an_error() {
        let err = shell(5_000).evaluate("true").await.unwrap_err();
        assert!(matches!(err, SubprocessError::EmptyOutput { .. }));

        let err = shell(5_000).evaluate("printf '  \n'").await.unwrap_err();
        assert!(matches!(err, SubprocessError::EmptyOutput { .. }));
    }

    #[tokio::test]
    async fn slow_evaluation_times_out() {
        let err = shell(100).evaluate("sleep 5").await.unwrap_err();
        assert!(matches!(err, SubprocessError::TimedOut { .. }));
    }

    #[tokio::test]
    async fn missing_interpreter_fails_to_spawn() {
        let evaluator = ScriptEvaluator::new(&MathConfig {
            command: "hcm-no-such-interpreter".into(),
            ..MathConfig::default()
        });
        let err = evaluator.evaluate("1").await.unwrap_err();
        assert!(matches!(err, SubprocessError::Spawn { .. }));
    }
}
