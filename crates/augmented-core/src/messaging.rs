use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A caller-selected tool invocation: the tool name plus its keyword arguments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default = "empty_arguments")]
    pub arguments: Value,
}

fn empty_arguments() -> Value {
    Value::Object(Default::default())
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Call a tool that takes no arguments.
    pub fn no_args(name: impl Into<String>) -> Self {
        Self::new(name, empty_arguments())
    }
}

/// Message exchanged during a run. The core only carries these in
/// [`RunResult`](crate::RunResult) bookkeeping and never inspects them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentMessage {
    pub role: MessageRole,
    pub content: MessageContent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum MessageRole {
    User,
    Agent,
    Tool,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value")]
pub enum MessageContent {
    Text(String),
    Json(Value),
}

impl MessageContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            MessageContent::Json(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn function_call_defaults_missing_arguments() {
        let call: FunctionCall = serde_json::from_value(json!({"name": "check_responses"})).unwrap();
        assert_eq!(call, FunctionCall::no_args("check_responses"));
        assert!(call.arguments.as_object().unwrap().is_empty());
    }

    #[test]
    fn message_content_accessors() {
        let text = MessageContent::Text("hi".into());
        assert_eq!(text.as_text(), Some("hi"));
        assert!(text.as_json().is_none());

        let json = MessageContent::Json(json!({"ok": true}));
        assert!(json.as_text().is_none());
        assert_eq!(json.as_json(), Some(&json!({"ok": true})));
    }
}
