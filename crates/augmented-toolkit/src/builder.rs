//! Builder utilities for creating tools and validators from closures
//!
//! This module converts plain Rust closures into [`Tool`] and
//! [`ResultValidator`] implementations that can be registered with an agent.

use augmented_core::tools::decode_args;
use augmented_core::{
    ModelRetry, ResultValidator, RunContext, SystemPromptFn, Tool, ToolBox, ToolError, ToolSchema,
    ValidatorBox,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Type alias for raw tool handler functions
pub type ToolHandlerFn<D, R> =
    Arc<dyn Fn(&RunContext<D>, Value) -> Result<R, ToolError> + Send + Sync>;

/// Type alias for validator handler functions
pub type ValidatorHandlerFn<D, R> =
    Arc<dyn Fn(&RunContext<D>, Option<R>) -> Result<R, ModelRetry> + Send + Sync>;

/// A tool implementation backed by a function/closure
pub struct FunctionTool<D, R> {
    schema: ToolSchema,
    handler: ToolHandlerFn<D, R>,
}

impl<D, R> Tool<D, R> for FunctionTool<D, R> {
    fn name(&self) -> &str {
        &self.schema.name
    }

    fn description(&self) -> &str {
        &self.schema.description
    }

    fn call(&self, ctx: &RunContext<D>, args: Value) -> Result<R, ToolError> {
        (self.handler)(ctx, args)
    }

    fn schema(&self) -> ToolSchema {
        self.schema.clone()
    }
}

/// Builder for creating tools from closures
pub struct ToolBuilder {
    name: String,
    description: String,
}

impl ToolBuilder {
    /// Start building a new tool with the given name and description
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Build the tool with a handler over typed arguments.
    ///
    /// The JSON argument object is decoded into `A` on every call; a decode
    /// failure is reported as [`ToolError::InvalidArguments`].
    pub fn build<D, R, A, F>(self, handler: F) -> ToolBox<D, R>
    where
        D: 'static,
        R: 'static,
        A: DeserializeOwned + 'static,
        F: Fn(&RunContext<D>, A) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        self.build_raw(move |ctx, args| {
            let args: A = decode_args(args)?;
            handler(ctx, args).map_err(ToolError::from)
        })
    }

    /// Build the tool with a handler over the raw JSON arguments
    pub fn build_raw<D, R, F>(self, handler: F) -> ToolBox<D, R>
    where
        D: 'static,
        R: 'static,
        F: Fn(&RunContext<D>, Value) -> Result<R, ToolError> + Send + Sync + 'static,
    {
        Arc::new(FunctionTool {
            schema: ToolSchema::new(self.name, self.description),
            handler: Arc::new(handler),
        })
    }
}

/// Quick helper to create a tool over typed arguments
pub fn tool_fn<D, R, A, F>(
    name: impl Into<String>,
    description: impl Into<String>,
    handler: F,
) -> ToolBox<D, R>
where
    D: 'static,
    R: 'static,
    A: DeserializeOwned + 'static,
    F: Fn(&RunContext<D>, A) -> anyhow::Result<R> + Send + Sync + 'static,
{
    ToolBuilder::new(name, description).build(handler)
}

/// A result validator backed by a function/closure
pub struct FunctionValidator<D, R> {
    name: String,
    handler: ValidatorHandlerFn<D, R>,
}

impl<D, R> ResultValidator<D, R> for FunctionValidator<D, R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, ctx: &RunContext<D>, result: Option<R>) -> Result<R, ModelRetry> {
        (self.handler)(ctx, result)
    }
}

/// Wrap a closure as a result validator
pub fn validator<D, R, F>(name: impl Into<String>, handler: F) -> ValidatorBox<D, R>
where
    D: 'static,
    R: 'static,
    F: Fn(&RunContext<D>, Option<R>) -> Result<R, ModelRetry> + Send + Sync + 'static,
{
    Arc::new(FunctionValidator {
        name: name.into(),
        handler: Arc::new(handler),
    })
}

/// Wrap a closure as a dynamic system prompt producer
pub fn system_prompt<D, F>(producer: F) -> SystemPromptFn<D>
where
    D: 'static,
    F: Fn(&RunContext<D>) -> String + Send + Sync + 'static,
{
    Arc::new(producer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use augmented_core::{Agent, AgentError, FunctionCall};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct AddArgs {
        a: i64,
        b: i64,
    }

    fn calculator() -> Agent<i64, i64> {
        let mut agent = Agent::new("test:calc", "You add numbers.");
        agent.tool(tool_fn(
            "add",
            "Adds two numbers to the offset",
            |ctx: &RunContext<i64>, args: AddArgs| Ok(ctx.deps + args.a + args.b),
        ));
        agent.tool(ToolBuilder::new("offset", "Returns the offset").build_raw(
            |ctx: &RunContext<i64>, _args: Value| Ok(ctx.deps),
        ));
        agent
    }

    #[test]
    fn function_tool_exposes_schema() {
        let tool: ToolBox<i64, i64> = tool_fn(
            "add",
            "Adds two numbers to the offset",
            |ctx: &RunContext<i64>, args: AddArgs| Ok(ctx.deps + args.a + args.b),
        );
        assert_eq!(tool.name(), "add");
        assert_eq!(
            tool.schema(),
            ToolSchema::new("add", "Adds two numbers to the offset")
        );
    }

    #[test]
    fn typed_tool_decodes_arguments() {
        let agent = calculator();
        let result = agent
            .run_sync(100, Some(FunctionCall::new("add", json!({"a": 5, "b": 3}))))
            .unwrap();
        assert_eq!(result.into_data(), Some(108));

        let result = agent
            .run_sync(7, Some(FunctionCall::no_args("offset")))
            .unwrap();
        assert_eq!(result.into_data(), Some(7));
    }

    #[test]
    fn typed_tool_rejects_bad_arguments() {
        let agent = calculator();
        let err = agent
            .run_sync(0, Some(FunctionCall::new("add", json!({"a": 5}))))
            .unwrap_err();
        assert!(matches!(err, AgentError::InvalidArguments { ref tool, .. } if tool == "add"));
    }

    #[test]
    fn handler_errors_become_tool_execution() {
        let mut agent: Agent<(), i64> = Agent::new("test", "");
        agent.tool(tool_fn(
            "boom",
            "Fails",
            |_ctx: &RunContext<()>, _args: Value| -> anyhow::Result<i64> {
                anyhow::bail!("boom")
            },
        ));
        let err = agent
            .run_sync((), Some(FunctionCall::no_args("boom")))
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolExecution { .. }));
    }

    #[test]
    fn closure_validator_and_prompt_register() {
        let mut agent = calculator();
        agent.result_validator(validator(
            "positive",
            |_ctx: &RunContext<i64>, result: Option<i64>| match result {
                Some(n) if n > 0 => Ok(n),
                _ => Err(ModelRetry::new("result must be positive")),
            },
        ));
        agent.system_prompt(system_prompt(|ctx: &RunContext<i64>| {
            format!("The offset is {}", ctx.deps)
        }));

        assert_eq!(
            agent.instructions(&RunContext::new(2)),
            "You add numbers.\n\nThe offset is 2"
        );

        let ok = agent
            .run_sync(1, Some(FunctionCall::no_args("offset")))
            .unwrap();
        assert_eq!(ok.into_data(), Some(1));

        let err = agent
            .run_sync(-1, Some(FunctionCall::no_args("offset")))
            .unwrap_err();
        assert_eq!(err.retry_reason(), Some("result must be positive"));
    }
}
