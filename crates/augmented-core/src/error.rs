//! Error taxonomy surfaced by [`Agent::run_sync`](crate::Agent::run_sync).
//!
//! The core recovers nothing locally: every failure is returned to the
//! immediate caller, who decides whether to retry.

use thiserror::Error;

use crate::validators::ModelRetry;

/// Result alias for agent invocations.
pub type Result<T> = std::result::Result<T, AgentError>;

#[derive(Debug, Error)]
pub enum AgentError {
    /// The requested function name is not registered on the agent.
    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },

    /// The arguments did not match the shape the tool expects.
    #[error("Invalid arguments for tool {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },

    /// The tool body itself failed; the original error is kept as the source.
    #[error("Tool {tool} failed: {source}")]
    ToolExecution {
        tool: String,
        #[source]
        source: anyhow::Error,
    },

    /// A result validator rejected the candidate result.
    #[error("Retry requested: {0}")]
    RetryRequested(#[from] ModelRetry),
}

impl AgentError {
    pub fn is_retry(&self) -> bool {
        matches!(self, AgentError::RetryRequested(_))
    }

    /// Reason carried by a validator rejection, if this is one.
    pub fn retry_reason(&self) -> Option<&str> {
        match self {
            AgentError::RetryRequested(retry) => Some(retry.reason()),
            _ => None,
        }
    }
}
