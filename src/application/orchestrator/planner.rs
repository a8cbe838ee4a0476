use super::errors::{OrchestratorError, PlanError, Stage};
use crate::application::structured::request_structured;
use crate::application::tools::{DispatchMiss, ToolHandler, ToolName, ToolRegistry};
use crate::config::PlanPolicy;
use crate::infrastructure::gateway::{CompletionGateway, OutputSchema};
use crate::types::ChatMessage;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Ordered tool names produced by the planning stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ExecutionPlan {
    /// Tool names in execution order
    pub tools: Vec<String>,
    /// Explanation of the plan
    pub context: String,
}

pub fn plan_schema() -> OutputSchema {
    OutputSchema::of::<ExecutionPlan>(
        "GenerateExecutionPlan",
        "Generate an ordered list of tools that fulfils the user's request",
    )
}

/// Ask the gateway for a plan covering `prompt`.
pub async fn generate_execution_plan(
    gateway: &dyn CompletionGateway,
    catalogue: &str,
    prompt: &str,
) -> Result<ExecutionPlan, OrchestratorError> {
    let messages = vec![
        ChatMessage::system(catalogue),
        ChatMessage::user(format!(
            "create an execution plan json based on this prompt: '{prompt}'"
        )),
    ];
    request_structured(gateway, messages, &plan_schema())
        .await
        .map_err(|err| OrchestratorError::from_stage(Stage::Planning, err))
}

/// One plan entry after lookup in the registry.
pub struct PlannedStep {
    pub planned: String,
    pub dispatch: Result<(ToolName, Arc<dyn ToolHandler>), DispatchMiss>,
}

impl PlannedStep {
    pub fn tool(&self) -> Option<ToolName> {
        match &self.dispatch {
            Ok((tool, _)) => Some(*tool),
            Err(DispatchMiss::Unregistered(tool)) => Some(*tool),
            Err(DispatchMiss::UnknownTool(_)) => None,
        }
    }

    /// Key used for duplicate detection: the tool when the name resolves,
    /// else the raw text.
    fn identity(&self) -> String {
        match self.tool() {
            Some(tool) => tool.handler_name().to_string(),
            None => self.planned.trim().to_string(),
        }
    }
}

/// Resolve every step of `plan` and apply `policy`.
///
/// Misses are reported here and again when the step is reached; they never
/// fail the plan.
pub fn resolve_plan(
    plan: &ExecutionPlan,
    registry: &ToolRegistry,
    policy: PlanPolicy,
) -> Result<Vec<PlannedStep>, PlanError> {
    if plan.tools.is_empty() {
        return Err(PlanError::Empty);
    }

    let steps: Vec<PlannedStep> = plan
        .tools
        .iter()
        .map(|planned| PlannedStep {
            planned: planned.clone(),
            dispatch: registry.resolve(planned),
        })
        .collect();

    for (index, step) in steps.iter().enumerate() {
        debug!(step = index + 1, planned = step.planned.as_str(), "Planned step");
        if let Err(miss) = &step.dispatch {
            warn!(step = index + 1, %miss, "Planned step has no handler");
        }
    }

    for (index, pair) in steps.windows(2).enumerate() {
        if pair[0].identity() != pair[1].identity() {
            continue;
        }
        match policy {
            PlanPolicy::Strict => {
                return Err(PlanError::ConsecutiveDuplicate {
                    tool: pair[1].planned.clone(),
                    first: index + 1,
                    second: index + 2,
                });
            }
            PlanPolicy::Advisory => {
                warn!(
                    tool = pair[1].planned.as_str(),
                    step = index + 2,
                    "Plan schedules the same tool twice in a row"
                );
            }
        }
    }

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(tools: &[&str]) -> ExecutionPlan {
        ExecutionPlan {
            tools: tools.iter().map(|tool| tool.to_string()).collect(),
            context: String::new(),
        }
    }

    #[test]
    fn empty_plan_is_rejected() {
        let registry = ToolRegistry::new();
        let err = resolve_plan(&plan(&[]), &registry, PlanPolicy::Advisory)
            .err()
            .expect("empty plan");
        assert_eq!(err, PlanError::Empty);
    }

    #[test]
    fn misses_are_kept_in_order() {
        let registry = ToolRegistry::new();
        let steps = resolve_plan(
            &plan(&["generateMath", "doesNotExist"]),
            &registry,
            PlanPolicy::Advisory,
        )
        .ok()
        .expect("resolves");
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].tool(), Some(ToolName::GenerateMath));
        assert_eq!(steps[1].tool(), None);
    }

    #[test]
    fn strict_policy_rejects_consecutive_duplicates() {
        let registry = ToolRegistry::new();
        let duplicated = plan(&["generateMath", "GenerateMath", "generateOutput"]);

        assert!(resolve_plan(&duplicated, &registry, PlanPolicy::Advisory).is_ok());
        let err = resolve_plan(&duplicated, &registry, PlanPolicy::Strict)
            .err()
            .expect("strict rejects");
        assert_eq!(
            err,
            PlanError::ConsecutiveDuplicate {
                tool: "GenerateMath".to_string(),
                first: 1,
                second: 2,
            }
        );
    }

    #[test]
    fn non_adjacent_repeats_are_allowed() {
        let registry = ToolRegistry::new();
        let repeated = plan(&["generateMath", "cacheResults", "generateMath"]);
        assert!(resolve_plan(&repeated, &registry, PlanPolicy::Strict).is_ok());
    }
}
