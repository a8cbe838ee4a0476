use super::display::DisplayTool;
use super::evaluator::ScriptEvaluator;
use super::handler::ToolHandler;
use super::math::MathTool;
use super::name::ToolName;
use super::output::OutputTool;
use crate::config::{MathConfig, PromptKind, PromptSet};
use crate::infrastructure::gateway::CompletionGateway;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// A planned step that has no handler to run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchMiss {
    #[error("'{0}' is not a known tool")]
    UnknownTool(String),
    #[error("no handler is registered for '{0}'")]
    Unregistered(ToolName),
}

/// Handlers keyed by the tool they implement.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    handlers: HashMap<ToolName, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The handlers shipped with the service: math, display markup and the
    /// final responder.
    pub fn builtin(
        gateway: Arc<dyn CompletionGateway>,
        prompts: &PromptSet,
        math: &MathConfig,
    ) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(MathTool::new(
            gateway.clone(),
            prompts.get(PromptKind::Math),
            ScriptEvaluator::new(math),
        )));
        registry.register(Arc::new(DisplayTool::new(
            gateway.clone(),
            prompts.get(PromptKind::Display),
        )));
        registry.register(Arc::new(OutputTool::new(
            gateway,
            prompts.get(PromptKind::Output),
        )));
        registry
    }

    /// Add or replace the handler for `handler.name()`.
    pub fn register(&mut self, handler: Arc<dyn ToolHandler>) {
        let name = handler.name();
        debug!(tool = %name, "Registered tool handler");
        self.handlers.insert(name, handler);
    }

    pub fn get(&self, tool: ToolName) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.get(&tool).cloned()
    }

    /// Map a planned name to its tool and handler.
    pub fn resolve(
        &self,
        planned: &str,
    ) -> Result<(ToolName, Arc<dyn ToolHandler>), DispatchMiss> {
        let tool =
            ToolName::resolve(planned).ok_or_else(|| DispatchMiss::UnknownTool(planned.to_string()))?;
        let handler = self.get(tool).ok_or(DispatchMiss::Unregistered(tool))?;
        Ok((tool, handler))
    }

    /// Tools with a registered handler, in catalogue order.
    pub fn catalogue(&self) -> Vec<ToolName> {
        ToolName::ALL
            .iter()
            .copied()
            .filter(|tool| self.handlers.contains_key(tool))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
