//! Per-request intermediate results.

use super::name::ToolName;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use utoipa::ToSchema;

/// Result of the math evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MathResult {
    pub equation: String,
    pub context: String,
    /// Printed value of the evaluated expression
    pub value: String,
}

/// Result of the display-markup generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DisplayMarkup {
    pub markup: String,
    pub context: String,
}

/// Everything a tool handler can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ToolOutput {
    Math(MathResult),
    Display(DisplayMarkup),
    Text { text: String },
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        ToolOutput::Text { text: text.into() }
    }

    /// Text returned to the user when this output concludes a plan.
    pub fn response_text(&self) -> &str {
        match self {
            ToolOutput::Math(result) => &result.value,
            ToolOutput::Display(display) => &display.markup,
            ToolOutput::Text { text } => text,
        }
    }
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolOutput::Math(result) => write!(
                f,
                "equation: {} | value: {} | context: {}",
                result.equation, result.value, result.context
            ),
            ToolOutput::Display(display) => {
                write!(f, "```display\n{}\n```", display.markup)
            }
            ToolOutput::Text { text } => f.write_str(text),
        }
    }
}

/// Token showing that a tool had no result when checked. Consumed by
/// [`ValuesCache::fill`].
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Vacancy {
    tool: ToolName,
}

/// Mapping from tool to its result, filled during one execution.
///
/// A key is written at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValuesCache {
    entries: BTreeMap<ToolName, ToolOutput>,
}

impl ValuesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` when `tool` already has a result.
    pub fn vacancy(&self, tool: ToolName) -> Option<Vacancy> {
        (!self.entries.contains_key(&tool)).then_some(Vacancy { tool })
    }

    /// Store `output` for the vacant tool. An entry written in the meantime
    /// is kept, the new output is dropped.
    pub fn fill(&mut self, vacancy: Vacancy, output: ToolOutput) {
        self.entries.entry(vacancy.tool).or_insert(output);
    }

    pub fn get(&self, tool: ToolName) -> Option<&ToolOutput> {
        self.entries.get(&tool)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One line per cached result, for inclusion in prompts.
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(tool, output)| format!("{}: {output}", tool.plan_name()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_tool_has_no_vacancy() {
        let mut cache = ValuesCache::new();
        let vacancy = cache.vacancy(ToolName::GenerateOutput).expect("empty cache");
        cache.fill(vacancy, ToolOutput::text("first"));

        assert!(cache.vacancy(ToolName::GenerateOutput).is_none());
        assert!(cache.vacancy(ToolName::GenerateMath).is_some());
    }

    #[test]
    fn stale_vacancy_does_not_overwrite() {
        let mut cache = ValuesCache::new();
        let first = cache.vacancy(ToolName::GenerateOutput).expect("empty cache");
        let second = cache.vacancy(ToolName::GenerateOutput).expect("still empty");
        cache.fill(first, ToolOutput::text("first"));
        cache.fill(second, ToolOutput::text("second"));

        assert_eq!(cache.len(), 1);
        assert_eq!(
            cache.get(ToolName::GenerateOutput).map(ToolOutput::response_text),
            Some("first")
        );
    }

    #[test]
    fn response_text_per_variant() {
        let math = ToolOutput::Math(MathResult {
            equation: "113124+9201".into(),
            context: "sum".into(),
            value: "122325".into(),
        });
        let display = ToolOutput::Display(DisplayMarkup {
            markup: "<p>122325</p>".into(),
            context: String::new(),
        });
        assert_eq!(math.response_text(), "122325");
        assert_eq!(display.response_text(), "<p>122325</p>");
        assert_eq!(ToolOutput::text("hi").response_text(), "hi");
    }

    #[test]
    fn render_lists_entries_by_plan_name() {
        let mut cache = ValuesCache::new();
        let vacancy = cache.vacancy(ToolName::GenerateMath).expect("empty cache");
        cache.fill(
            vacancy,
            ToolOutput::Math(MathResult {
                equation: "1+1".into(),
                context: "add".into(),
                value: "2".into(),
            }),
        );
        let rendered = cache.render();
        assert!(rendered.starts_with("generateMath: "));
        assert!(rendered.contains("value: 2"));
    }
}
