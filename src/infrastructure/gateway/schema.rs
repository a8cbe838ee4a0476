//! Structured-output schemas.
//!
//! Each stage that expects JSON from the model sends an `OutputSchema` as
//! the request's `response_format`. The schema is derived from the Rust type
//! the completion decodes into. Strict mode on the provider side should
//! guarantee the shape, but every completion is still checked against the
//! schema here before it is decoded, so a provider without that guarantee
//! fails fast instead of producing partial values.

use jsonschema::{Draft, JSONSchema};
use schemars::JsonSchema;
use schemars::schema::RootSchema;
use schemars::schema_for;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use thiserror::Error;

/// JSON Schema of a completion type, with the name and description the
/// provider sees.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    name: String,
    description: String,
    schema: RootSchema,
}

impl OutputSchema {
    /// Derive the schema of `T`. Types that want `additionalProperties: false`
    /// carry `#[serde(deny_unknown_fields)]`.
    pub fn of<T: JsonSchema>(name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut schema = schema_for!(T);
        schema.meta_schema = None;
        Self {
            name: name.into(),
            description: description.into(),
            schema,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// JSON Schema document for the object
    pub fn json_schema(&self) -> Value {
        json!(self.schema)
    }

    /// `response_format` payload for OpenAI-compatible endpoints
    pub fn response_format(&self) -> Value {
        json!({
            "type": "json_schema",
            "json_schema": {
                "name": self.name,
                "description": self.description,
                "schema": self.json_schema(),
                "strict": true
            }
        })
    }

    /// Check `value` against the schema.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        let schema_json = self.json_schema();
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_json)
            .map_err(|err| self.violation(format!("schema compile: {err}")))?;
        if let Err(errors) = compiled.validate(value) {
            let first = errors
                .into_iter()
                .next()
                .map(|err| err.to_string())
                .unwrap_or_else(|| "schema validation failed".to_string());
            return Err(self.violation(first));
        }
        Ok(())
    }

    /// Parse, validate and decode a completion text.
    pub fn decode<T: DeserializeOwned>(&self, text: &str) -> Result<T, SchemaError> {
        let value: Value = serde_json::from_str(text.trim()).map_err(|source| {
            SchemaError::Malformed {
                schema: self.name.clone(),
                source,
            }
        })?;
        self.validate(&value)?;
        serde_json::from_value(value).map_err(|source| SchemaError::Malformed {
            schema: self.name.clone(),
            source,
        })
    }

    fn violation(&self, reason: impl Into<String>) -> SchemaError {
        SchemaError::Violation {
            schema: self.name.clone(),
            reason: reason.into(),
        }
    }
}

/// A completion did not have the requested shape
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("completion for '{schema}' is not valid JSON: {source}")]
    Malformed {
        schema: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("completion for '{schema}' does not match its schema: {reason}")]
    Violation { schema: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    #[serde(deny_unknown_fields)]
    struct Decision {
        #[serde(rename = "useTool")]
        use_tool: bool,
        context: String,
    }

    fn decision_schema() -> OutputSchema {
        OutputSchema::of::<Decision>("ShouldUseTool", "decide")
    }

    #[test]
    fn decodes_matching_completion() {
        let decision: Decision = decision_schema()
            .decode(r#"{"useTool": true, "context": "math"}"#)
            .expect("valid completion");
        assert_eq!(
            decision,
            Decision {
                use_tool: true,
                context: "math".into()
            }
        );
    }

    #[test]
    fn rejects_wrong_type() {
        let err = decision_schema()
            .decode::<Decision>(r#"{"useTool": "yes", "context": "math"}"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::Violation { .. }));
    }

    #[test]
    fn rejects_missing_and_extra_fields() {
        let schema = decision_schema();
        assert!(matches!(
            schema.decode::<Decision>(r#"{"useTool": true}"#),
            Err(SchemaError::Violation { .. })
        ));
        assert!(matches!(
            schema.decode::<Decision>(r#"{"useTool": true, "context": "", "extra": 1}"#),
            Err(SchemaError::Violation { .. })
        ));
    }

    #[test]
    fn rejects_non_json_text() {
        let err = decision_schema()
            .decode::<Decision>("Sure! Here is your answer")
            .unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { .. }));
    }

    #[test]
    fn response_format_is_strict_json_schema() {
        let format = decision_schema().response_format();
        assert_eq!(format["type"], "json_schema");
        assert_eq!(format["json_schema"]["strict"], true);

        let schema = &format["json_schema"]["schema"];
        assert!(schema.get("$schema").is_none());
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["additionalProperties"], false);
        assert_eq!(schema["properties"]["useTool"]["type"], "boolean");
        let mut required: Vec<&str> = schema["required"]
            .as_array()
            .expect("required list")
            .iter()
            .filter_map(Value::as_str)
            .collect();
        required.sort_unstable();
        assert_eq!(required, vec!["context", "useTool"]);
    }
}
