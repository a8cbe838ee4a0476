//! Tool handlers the orchestrator dispatches plan steps to.

mod cache;
mod display;
mod error;
mod evaluator;
mod handler;
mod math;
mod name;
mod output;
mod registry;

pub use cache::{DisplayMarkup, MathResult, ToolOutput, Vacancy, ValuesCache};
pub use display::DisplayTool;
pub use error::{SubprocessError, ToolError};
pub use evaluator::ScriptEvaluator;
pub use handler::ToolHandler;
pub use math::MathTool;
pub use name::{ToolName, capitalize_first};
pub use output::OutputTool;
pub use registry::{DispatchMiss, ToolRegistry};
