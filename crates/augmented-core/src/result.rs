use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::messaging::AgentMessage;

/// Token accounting for a run. Always zero here since no model is called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cost {
    pub request_tokens: u64,
    pub response_tokens: u64,
    pub total_tokens: u64,
}

/// Outcome of one [`Agent::run_sync`](crate::Agent::run_sync) call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult<R> {
    pub data: Option<R>,
    pub run_id: Uuid,
    all_messages: Vec<AgentMessage>,
    new_message_index: usize,
    cost: Cost,
}

impl<R> RunResult<R> {
    pub fn new(data: Option<R>) -> Self {
        Self::with_run_id(data, Uuid::new_v4())
    }

    pub(crate) fn with_run_id(data: Option<R>, run_id: Uuid) -> Self {
        Self {
            data,
            run_id,
            all_messages: Vec::new(),
            new_message_index: 0,
            cost: Cost::default(),
        }
    }

    pub fn data(&self) -> Option<&R> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<R> {
        self.data
    }

    pub fn all_messages(&self) -> &[AgentMessage] {
        &self.all_messages
    }

    /// Messages produced by this run, i.e. those from the new-message index on.
    pub fn new_messages(&self) -> &[AgentMessage] {
        let start = self.new_message_index.min(self.all_messages.len());
        &self.all_messages[start..]
    }

    pub fn new_message_index(&self) -> usize {
        self.new_message_index
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookkeeping_defaults_are_empty() {
        let result = RunResult::new(Some(7));
        assert_eq!(result.data(), Some(&7));
        assert!(result.all_messages().is_empty());
        assert!(result.new_messages().is_empty());
        assert_eq!(result.new_message_index(), 0);
        assert_eq!(result.cost(), Cost::default());
        assert_eq!(result.into_data(), Some(7));
    }

    #[test]
    fn each_run_gets_its_own_id() {
        let a: RunResult<()> = RunResult::new(None);
        let b: RunResult<()> = RunResult::new(None);
        assert_ne!(a.run_id, b.run_id);
    }
}
