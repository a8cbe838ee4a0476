//! Closed catalogue of tool names the planner may schedule.

use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

macro_rules! tool_names {
    ($($variant:ident => $plan:literal, $description:literal;)+) => {
        /// Every tool advertised to the planner.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, ToSchema)]
        pub enum ToolName {
            $($variant,)+
        }

        impl ToolName {
            pub const ALL: &'static [ToolName] = &[$(ToolName::$variant,)+];

            /// lowerCamelCase name used in execution plans
            pub fn plan_name(self) -> &'static str {
                match self {
                    $(ToolName::$variant => $plan,)+
                }
            }

            /// UpperCamelCase name the handlers are registered under
            pub fn handler_name(self) -> &'static str {
                match self {
                    $(ToolName::$variant => stringify!($variant),)+
                }
            }

            pub fn description(self) -> &'static str {
                match self {
                    $(ToolName::$variant => $description,)+
                }
            }
        }
    };
}

tool_names! {
    GenerateApi => "generateApi", "Builds an API call from the request parameters.";
    CallApi => "callApi", "Executes an API call and retrieves its data.";
    ParseResponse => "parseResponse", "Parses an API response into usable data.";
    GenerateDisplayHtml => "generateDisplayHtml", "Generates the HTML needed to display data.";
    GenerateOutput => "generateOutput", "Writes the final chat reply.";
    CacheResults => "cacheResults", "Keeps intermediate results between stages.";
    GenerateMath => "generateMath", "Builds and evaluates a calculation.";
    FetchDatabase => "fetchDatabase", "Reads records from the database.";
    StoreData => "storeData", "Writes records to the database.";
    ProcessData => "processData", "Turns raw data into meaningful information.";
    FilterData => "filterData", "Keeps data matching some criteria.";
    SortData => "sortData", "Orders data ascending or descending.";
    TransformData => "transformData", "Converts data into another format.";
    GenerateReport => "generateReport", "Produces a report from processed data.";
    SendEmail => "sendEmail", "Sends a report or other data by email.";
    GenerateGraph => "generateGraph", "Draws a graph from data.";
    ExecuteScript => "executeScript", "Runs a script or a sequence of commands.";
    LogActivity => "logActivity", "Records what the plan did.";
}

impl ToolName {
    /// Resolve a planned tool name.
    ///
    /// Plans use lowerCamelCase while handlers are registered under
    /// UpperCamelCase, so the first character is upper-cased before the
    /// lookup. Any other difference in spelling does not resolve.
    pub fn resolve(planned: &str) -> Option<ToolName> {
        let normalized = capitalize_first(planned.trim());
        ToolName::ALL
            .iter()
            .copied()
            .find(|tool| tool.handler_name() == normalized)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.handler_name())
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_and_handler_names_differ_only_in_first_letter() {
        for tool in ToolName::ALL {
            assert_eq!(capitalize_first(tool.plan_name()), tool.handler_name());
            assert_eq!(ToolName::resolve(tool.plan_name()), Some(*tool));
        }
    }

    #[test]
    fn resolve_accepts_either_casing_of_first_letter() {
        assert_eq!(ToolName::resolve("generateMath"), Some(ToolName::GenerateMath));
        assert_eq!(ToolName::resolve("GenerateMath"), Some(ToolName::GenerateMath));
    }

    #[test]
    fn resolve_rejects_other_spellings() {
        assert_eq!(ToolName::resolve("doesNotExist"), None);
        assert_eq!(ToolName::resolve("generatemath"), None);
        assert_eq!(ToolName::resolve(""), None);
    }

    #[test]
    fn capitalize_handles_multibyte_first_char() {
        assert_eq!(capitalize_first("éclair"), "Éclair");
        assert_eq!(capitalize_first(""), "");
    }
}
