//! Caller-side retry loop.
//!
//! `Agent::run_sync` never retries on its own. This loop re-invokes it when a
//! validator asks for a retry and gives up after a bounded number of attempts.

use augmented_core::{Agent, AgentError, FunctionCall, RunResult};

/// How many times a rejected run is attempted in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
}

impl RetryPolicy {
    /// At least one attempt is always made.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}

/// Run `function_call` until the validators accept the result or the policy
/// is exhausted.
///
/// `deps_for_attempt` builds a fresh dependency bundle for each attempt and
/// receives the 1-based attempt number. Only
/// [`AgentError::RetryRequested`] triggers another attempt; every other error
/// is returned immediately. When attempts run out the last retry request is
/// returned.
pub fn run_with_retries<D, R, F>(
    agent: &Agent<D, R>,
    policy: &RetryPolicy,
    mut deps_for_attempt: F,
    function_call: Option<FunctionCall>,
) -> Result<RunResult<R>, AgentError>
where
    F: FnMut(u32) -> D,
{
    let mut attempt = 1;
    loop {
        match agent.run_sync(deps_for_attempt(attempt), function_call.clone()) {
            Err(err) if err.is_retry() && attempt < policy.max_attempts() => {
                tracing::warn!(
                    attempt,
                    max_attempts = policy.max_attempts(),
                    reason = err.retry_reason().unwrap_or_default(),
                    "result rejected, running again"
                );
                attempt += 1;
            }
            outcome => return outcome,
        }
    }
}
