//! Core traits and data models for augmented agents.
//! An [`Agent`] binds a dependency type and a result type to a registry of
//! tools and an ordered chain of result validators, and dispatches a single
//! function call synchronously through [`Agent::run_sync`].

pub mod agent;
pub mod context;
pub mod error;
pub mod messaging;
pub mod result;
pub mod tools;
pub mod validators;

pub use agent::{Agent, SystemPromptFn};
pub use context::RunContext;
pub use error::{AgentError, Result};
pub use messaging::{AgentMessage, FunctionCall, MessageContent, MessageRole};
pub use result::{Cost, RunResult};
pub use tools::{decode_args, Tool, ToolBox, ToolError, ToolRegistry, ToolSchema};
pub use validators::{ModelRetry, ResultValidator, ValidatorBox};
