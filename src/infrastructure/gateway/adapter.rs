//! Message adapter - converts conversation messages to the wire format

use crate::types::ChatMessage;
use serde_json::{Map, Value, json};

pub struct MessageAdapter;

impl MessageAdapter {
    /// Convert messages to OpenAI-style format
    /// Returns: [{"role": "...", "content": "...", ...metadata}]
    pub fn to_openai_format(messages: &[ChatMessage]) -> Vec<Value> {
        messages.iter().map(Self::message_to_openai).collect()
    }

    fn message_to_openai(message: &ChatMessage) -> Value {
        let mut entry = Map::new();
        entry.insert("role".into(), json!(message.role.as_str()));
        entry.insert("content".into(), json!(message.content));
        if let Some(name) = &message.name {
            entry.insert("name".into(), json!(name));
        }
        if !message.tool_calls.is_empty() {
            entry.insert("tool_calls".into(), json!(message.tool_calls));
        }
        if let Some(id) = &message.tool_call_id {
            entry.insert("tool_call_id".into(), json!(id));
        }
        Value::Object(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FunctionCall, MessageRole, ToolCall};

    #[test]
    fn plain_messages_carry_role_and_content_only() {
        let wire = MessageAdapter::to_openai_format(&[ChatMessage::system("be nice")]);
        assert_eq!(wire, vec![json!({"role": "system", "content": "be nice"})]);
    }

    #[test]
    fn tool_metadata_is_forwarded() {
        let mut call = ChatMessage::new(MessageRole::Assistant, "");
        call.tool_calls.push(ToolCall {
            id: "call_1".into(),
            kind: "function".into(),
            function: FunctionCall {
                name: "generateMath".into(),
                arguments: "{}".into(),
            },
        });
        let mut result = ChatMessage::new(MessageRole::Tool, "42");
        result.tool_call_id = Some("call_1".into());

        let wire = MessageAdapter::to_openai_format(&[call, result]);
        assert_eq!(wire[0]["tool_calls"][0]["function"]["name"], "generateMath");
        assert_eq!(wire[1]["tool_call_id"], "call_1");
        assert_eq!(wire[1]["role"], "tool");
    }
}
