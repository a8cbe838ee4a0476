use super::decision::{ToolResponse, should_use_tool};
use super::errors::OrchestratorError;
use super::planner::{ExecutionPlan, PlannedStep, generate_execution_plan, resolve_plan};
use crate::application::tools::{ToolName, ToolRegistry, ValuesCache};
use crate::config::{PlanPolicy, PromptKind, PromptSet};
use crate::infrastructure::gateway::{CompletionGateway, CompletionRequest};
use crate::types::{ChatMessage, latest_user_prompt};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};
use utoipa::ToSchema;

/// What happened to one planned step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StepReport {
    pub planned: String,
    pub tool: Option<ToolName>,
    pub status: StepStatus,
}

/// Result of handling one conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Outcome {
    pub response: String,
    pub decision: ToolResponse,
    /// Absent when the request was answered directly
    pub plan: Option<ExecutionPlan>,
    pub steps: Vec<StepReport>,
}

/// A finished plan run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    /// Result cached under the last planned step
    pub response: String,
    pub steps: Vec<StepReport>,
    /// Every result produced during the run
    pub cache: ValuesCache,
}

/// Drives a conversation through decision, planning and execution.
pub struct Orchestrator {
    gateway: Arc<dyn CompletionGateway>,
    prompts: PromptSet,
    registry: ToolRegistry,
    policy: PlanPolicy,
}

impl Orchestrator {
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        prompts: PromptSet,
        registry: ToolRegistry,
        policy: PlanPolicy,
    ) -> Self {
        Self {
            gateway,
            prompts,
            registry,
            policy,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Decode a JSON message list and handle it.
    pub async fn handle_raw(&self, raw: &str) -> Result<Outcome, OrchestratorError> {
        let conversation: Vec<ChatMessage> =
            serde_json::from_str(raw).map_err(OrchestratorError::InvalidConversation)?;
        self.handle(&conversation).await
    }

    pub async fn handle(&self, conversation: &[ChatMessage]) -> Result<Outcome, OrchestratorError> {
        if conversation.is_empty() {
            return Err(OrchestratorError::EmptyConversation);
        }
        info!(messages = conversation.len(), "Handling conversation");

        let decision = self.decide(conversation).await?;
        info!(
            use_tool = decision.use_tool,
            context = decision.context.as_str(),
            "Decision stage finished"
        );

        if !decision.use_tool {
            let response = self.complete_directly(conversation).await?;
            return Ok(Outcome {
                response,
                decision,
                plan: None,
                steps: Vec::new(),
            });
        }

        let plan = self.plan(conversation).await?;
        let execution = self.execute(&plan, conversation).await?;
        Ok(Outcome {
            response: execution.response,
            decision,
            plan: Some(plan),
            steps: execution.steps,
        })
    }

    pub async fn decide(
        &self,
        conversation: &[ChatMessage],
    ) -> Result<ToolResponse, OrchestratorError> {
        should_use_tool(
            self.gateway.as_ref(),
            self.prompts.get(PromptKind::Decision),
            conversation,
        )
        .await
    }

    /// Plan against the most recent user message.
    pub async fn plan(
        &self,
        conversation: &[ChatMessage],
    ) -> Result<ExecutionPlan, OrchestratorError> {
        let prompt = latest_user_prompt(conversation).ok_or(OrchestratorError::MissingPrompt)?;
        let plan = generate_execution_plan(
            self.gateway.as_ref(),
            self.prompts.get(PromptKind::Planner),
            prompt,
        )
        .await?;
        info!(
            steps = plan.tools.len(),
            context = plan.context.as_str(),
            "Planning stage finished"
        );
        Ok(plan)
    }

    /// Persona first, then everything after the original first message.
    async fn complete_directly(
        &self,
        conversation: &[ChatMessage],
    ) -> Result<String, OrchestratorError> {
        let mut messages = Vec::with_capacity(conversation.len());
        messages.push(ChatMessage::system(self.prompts.get(PromptKind::Persona)));
        messages.extend_from_slice(&conversation[1..]);

        let completion = self
            .gateway
            .complete(CompletionRequest::new(messages))
            .await
            .map_err(OrchestratorError::Completion)?;
        debug!(choices = completion.choices.len(), "Direct completion received");
        completion.into_last().map_err(OrchestratorError::Completion)
    }

    /// Run `plan` step by step and return the last step's result with a
    /// report for every step.
    pub async fn execute(
        &self,
        plan: &ExecutionPlan,
        conversation: &[ChatMessage],
    ) -> Result<Execution, OrchestratorError> {
        let steps = resolve_plan(plan, &self.registry, self.policy)?;
        let mut cache = ValuesCache::new();
        let mut reports = Vec::with_capacity(steps.len());

        for (index, step) in steps.iter().enumerate() {
            let report = self.run_step(index + 1, step, &mut cache, conversation).await?;
            reports.push(report);
        }

        let response = conclude(&steps, &cache)?;
        info!(cached = cache.len(), "Execution finished");
        Ok(Execution {
            response,
            steps: reports,
            cache,
        })
    }

    async fn run_step(
        &self,
        position: usize,
        step: &PlannedStep,
        cache: &mut ValuesCache,
        conversation: &[ChatMessage],
    ) -> Result<StepReport, OrchestratorError> {
        let (tool, handler) = match &step.dispatch {
            Ok(resolved) => resolved.clone(),
            Err(miss) => {
                warn!(step = position, %miss, "Skipping step");
                return Ok(StepReport {
                    planned: step.planned.clone(),
                    tool: step.tool(),
                    status: StepStatus::Skipped {
                        reason: miss.to_string(),
                    },
                });
            }
        };

        let Some(vacancy) = cache.vacancy(tool) else {
            warn!(step = position, tool = %tool, "Result already cached, skipping repeated step");
            return Ok(StepReport {
                planned: step.planned.clone(),
                tool: Some(tool),
                status: StepStatus::Skipped {
                    reason: format!("'{tool}' already produced a result"),
                },
            });
        };

        info!(step = position, tool = %tool, "Running step");
        let output = handler
            .invoke(cache, conversation)
            .await
            .map_err(|source| OrchestratorError::Handler { tool, source })?;
        cache.fill(vacancy, output);
        debug!(step = position, tool = %tool, "Step completed");

        Ok(StepReport {
            planned: step.planned.clone(),
            tool: Some(tool),
            status: StepStatus::Completed,
        })
    }
}

/// Response text cached under the last planned step's tool.
fn conclude(steps: &[PlannedStep], cache: &ValuesCache) -> Result<String, OrchestratorError> {
    let Some(last) = steps.last() else {
        return Err(OrchestratorError::ResultMissing {
            tool: String::new(),
        });
    };
    last.tool()
        .and_then(|tool| cache.get(tool))
        .map(|output| output.response_text().to_string())
        .ok_or_else(|| OrchestratorError::ResultMissing {
            tool: last.planned.clone(),
        })
}
