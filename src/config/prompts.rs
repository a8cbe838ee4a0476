//! Natural-language instructions sent to the completion gateway.
//!
//! Prompts are text assets under `prompts/`. The built-in copies are
//! embedded at compile time; a `[prompts] dir` entry replaces any asset
//! whose file exists in that directory. Nothing in the orchestrator parses
//! these texts, only the JSON contracts attached to each call matter.

use super::error::ConfigError;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    /// Instruction for the "should a tool be used" decision
    Decision,
    /// Tool catalogue and worked examples for execution planning
    Planner,
    /// Persona used for direct (tool-less) answers
    Persona,
    /// Expression generation for the math evaluator
    Math,
    /// Markup rules for the display generator
    Display,
    /// Final responder instruction, followed by the cached results
    Output,
}

impl PromptKind {
    pub const ALL: [PromptKind; 6] = [
        PromptKind::Decision,
        PromptKind::Planner,
        PromptKind::Persona,
        PromptKind::Math,
        PromptKind::Display,
        PromptKind::Output,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            PromptKind::Decision => "decision.md",
            PromptKind::Planner => "planner.md",
            PromptKind::Persona => "persona.md",
            PromptKind::Math => "math.md",
            PromptKind::Display => "display.md",
            PromptKind::Output => "output.md",
        }
    }

    fn builtin(self) -> &'static str {
        match self {
            PromptKind::Decision => include_str!("../../prompts/decision.md"),
            PromptKind::Planner => include_str!("../../prompts/planner.md"),
            PromptKind::Persona => include_str!("../../prompts/persona.md"),
            PromptKind::Math => include_str!("../../prompts/math.md"),
            PromptKind::Display => include_str!("../../prompts/display.md"),
            PromptKind::Output => include_str!("../../prompts/output.md"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSet {
    decision: String,
    planner: String,
    persona: String,
    math: String,
    display: String,
    output: String,
}

impl Default for PromptSet {
    fn default() -> Self {
        Self {
            decision: PromptKind::Decision.builtin().trim().to_string(),
            planner: PromptKind::Planner.builtin().trim().to_string(),
            persona: PromptKind::Persona.builtin().trim().to_string(),
            math: PromptKind::Math.builtin().trim().to_string(),
            display: PromptKind::Display.builtin().trim().to_string(),
            output: PromptKind::Output.builtin().trim().to_string(),
        }
    }
}

impl PromptSet {
    /// Built-in prompts, with overrides read from `dir` when given.
    pub fn load(dir: Option<&Path>) -> Result<Self, ConfigError> {
        let mut prompts = Self::default();
        let Some(dir) = dir else {
            return Ok(prompts);
        };
        for kind in PromptKind::ALL {
            let path = dir.join(kind.file_name());
            if !path.is_file() {
                continue;
            }
            let text = fs::read_to_string(&path).map_err(|source| ConfigError::Prompt {
                path: path.clone(),
                source,
            })?;
            debug!(path = %path.display(), "Loaded prompt override");
            prompts.set(kind, text.trim().to_string());
        }
        Ok(prompts)
    }

    pub fn get(&self, kind: PromptKind) -> &str {
        match kind {
            PromptKind::Decision => &self.decision,
            PromptKind::Planner => &self.planner,
            PromptKind::Persona => &self.persona,
            PromptKind::Math => &self.math,
            PromptKind::Display => &self.display,
            PromptKind::Output => &self.output,
        }
    }

    pub fn set(&mut self, kind: PromptKind, text: impl Into<String>) {
        let slot = match kind {
            PromptKind::Decision => &mut self.decision,
            PromptKind::Planner => &mut self.planner,
            PromptKind::Persona => &mut self.persona,
            PromptKind::Math => &mut self.math,
            PromptKind::Display => &mut self.display,
            PromptKind::Output => &mut self.output,
        };
        *slot = text.into();
    }

    pub fn with(mut self, kind: PromptKind, text: impl Into<String>) -> Self {
        self.set(kind, text);
        self
    }
}
