//! # Orchestrator
//!
//! Turns a conversation into a response text.
//!
//! ## Flow
//!
//! 1. The decision stage asks whether tools are needed.
//! 2. If not, one completion with the persona prompt answers directly.
//! 3. Otherwise the planning stage produces an [`ExecutionPlan`], which is
//!    resolved against the [`ToolRegistry`](crate::application::tools::ToolRegistry)
//!    and executed strictly in order. Each handler sees the values cached
//!    by earlier steps.
//! 4. The response is the cached result of the last planned tool.
//!
//! A planned name without a handler is skipped with a warning. A failing
//! handler aborts the request.

mod decision;
mod errors;
mod planner;
mod runner;

pub use decision::{ToolResponse, decision_schema, should_use_tool};
pub use errors::{OrchestratorError, PlanError, Stage};
pub use planner::{ExecutionPlan, PlannedStep, generate_execution_plan, plan_schema, resolve_plan};
pub use runner::{Execution, Orchestrator, Outcome, StepReport, StepStatus};
