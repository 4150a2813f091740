//! Result validators and the retry signal they raise.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::context::RunContext;

/// Signal raised by a validator to reject the current candidate result.
///
/// The agent never retries on its own; the signal is returned to the caller
/// as [`AgentError::RetryRequested`](crate::AgentError::RetryRequested).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRetry {
    reason: String,
}

impl ModelRetry {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ModelRetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for ModelRetry {}

/// Inspects, and possibly transforms, a candidate result.
///
/// The first validator in the chain receives the tool output (or `None` when
/// no function call was made); every later validator receives the output of
/// the one before it.
pub trait ResultValidator<D, R>: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    fn validate(&self, ctx: &RunContext<D>, result: Option<R>) -> Result<R, ModelRetry>;
}

/// Shared validator handle stored by an agent.
pub type ValidatorBox<D, R> = Arc<dyn ResultValidator<D, R>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_reason() {
        let retry = ModelRetry::new("try again");
        assert_eq!(retry.to_string(), "try again");
        assert_eq!(retry.reason(), "try again");
    }
}
