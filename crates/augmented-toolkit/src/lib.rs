//! Toolkit for building augmented agents
//!
//! This crate provides:
//! - `#[tool]` macro for turning plain functions into tools
//! - Closure-backed tools, validators and system prompts
//! - A caller-side retry loop around `Agent::run_sync`
//!
//! ## Recommended Usage
//!
//! ```rust,ignore
//! use augmented_toolkit::{tool, validator, Agent, ModelRetry, RunContext};
//!
//! /// Shouts the given text
//! #[tool]
//! fn shout(_ctx: &RunContext<()>, text: String) -> anyhow::Result<String> {
//!     Ok(text.to_uppercase())
//! }
//!
//! let mut agent = Agent::<(), String>::new("test", "");
//! agent.tool(ShoutTool::as_tool());
//! agent.result_validator(validator("non_empty", |_ctx, result: Option<String>| {
//!     result.filter(|s| !s.is_empty()).ok_or_else(|| ModelRetry::new("empty"))
//! }));
//! ```

pub mod builder;
pub mod retry;

// Re-export core types from augmented-core for convenience
pub use augmented_core::{
    Agent, AgentError, FunctionCall, ModelRetry, ResultValidator, RunContext, RunResult,
    SystemPromptFn, Tool, ToolBox, ToolError, ToolSchema, ValidatorBox,
};

pub use builder::{system_prompt, tool_fn, validator, FunctionTool, FunctionValidator, ToolBuilder};
pub use retry::{run_with_retries, RetryPolicy};

// Re-export the #[tool] macro
pub use augmented_macros::tool;
