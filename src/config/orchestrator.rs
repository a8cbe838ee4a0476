use serde::{Deserialize, Serialize};

/// How plans that schedule the same tool back-to-back are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanPolicy {
    /// Log the repetition; the repeated step is skipped at execution
    #[default]
    Advisory,
    /// Reject the plan before any tool runs
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrchestratorConfig {
    pub plan_policy: PlanPolicy,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(super) struct RawOrchestrator {
    pub(super) plan_policy: Option<PlanPolicy>,
}
