//! Tool seam for agents
//!
//! A tool is a named callable that receives the per-call [`RunContext`] and a
//! JSON argument object, and produces a value of the agent's result type.
//! Argument shape is never checked at registration; a tool decodes its
//! arguments when it is called and reports a mismatch as
//! [`ToolError::InvalidArguments`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::context::RunContext;

/// Name and description of a registered tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique, stable name used to select the tool in a function call
    pub name: String,

    /// Human-readable description of what this tool does
    pub description: String,
}

impl ToolSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Failure raised from inside a tool
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments could not be decoded into the shape the tool expects
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The tool body failed
    #[error(transparent)]
    Execution(#[from] anyhow::Error),
}

impl ToolError {
    pub fn invalid_arguments(reason: impl Into<String>) -> Self {
        Self::InvalidArguments(reason.into())
    }
}

/// Decode a JSON argument object into a typed argument struct.
///
/// `null` is treated as an empty object so that argument-less tools can be
/// called without an `arguments` field.
pub fn decode_args<A>(args: Value) -> Result<A, ToolError>
where
    A: DeserializeOwned,
{
    let args = match args {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(args).map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Core trait for tool implementations
pub trait Tool<D, R>: Send + Sync {
    /// Registry key for this tool
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Executes the tool with the given context and arguments
    fn call(&self, ctx: &RunContext<D>, args: Value) -> Result<R, ToolError>;

    fn schema(&self) -> ToolSchema {
        ToolSchema::new(self.name(), self.description())
    }
}

/// Shared tool handle stored by an agent
pub type ToolBox<D, R> = Arc<dyn Tool<D, R>>;

/// Name-keyed tool registry
pub struct ToolRegistry<D, R> {
    tools: HashMap<String, ToolBox<D, R>>,
}

impl<D, R> ToolRegistry<D, R> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool under its own name. A tool already registered under
    /// that name is replaced and handed back.
    pub fn register(&mut self, tool: ToolBox<D, R>) -> Option<ToolBox<D, R>> {
        let name = tool.name().to_string();
        self.tools.insert(name, tool)
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&ToolBox<D, R>> {
        self.tools.get(name)
    }

    /// Check if a tool is registered
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Tool schemas, sorted by name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<ToolSchema> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl<D, R> Default for ToolRegistry<D, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, R> Clone for ToolRegistry<D, R> {
    fn clone(&self) -> Self {
        Self {
            tools: self.tools.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[derive(Deserialize)]
    struct EchoArgs {
        text: String,
    }

    impl Tool<(), String> for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes back the input"
        }

        fn call(&self, _ctx: &RunContext<()>, args: Value) -> Result<String, ToolError> {
            let args: EchoArgs = decode_args(args)?;
            Ok(args.text)
        }
    }

    struct Shout;

    impl Tool<(), String> for Shout {
        fn name(&self) -> &str {
            "echo"
        }

        fn call(&self, _ctx: &RunContext<()>, _args: Value) -> Result<String, ToolError> {
            Ok("LOUD".into())
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.register(Arc::new(Echo)).is_none());
        assert!(registry.has("echo"));
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.schemas(),
            vec![ToolSchema::new("echo", "Echoes back the input")]
        );
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Echo));
        let replaced = registry.register(Arc::new(Shout));
        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);

        let ctx = RunContext::new(());
        let out = registry.get("echo").unwrap().call(&ctx, json!({})).unwrap();
        assert_eq!(out, "LOUD");
    }

    #[test]
    fn decode_args_reports_shape_mismatch() {
        let err = decode_args::<EchoArgs>(json!({"text": 5})).err().unwrap();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
    }

    #[test]
    fn decode_args_treats_null_as_empty_object() {
        #[derive(Deserialize)]
        struct NoArgs {}
        assert!(decode_args::<NoArgs>(Value::Null).is_ok());
    }
}
