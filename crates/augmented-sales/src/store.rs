//! Record store for leads and messages.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::models::{LeadRecord, MessageRecord};

/// Timestamp format recorded in `LeadRecord::last_message_sent`.
pub const LAST_MESSAGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Storage for leads and the messages exchanged with them.
pub trait RecordStore: Send + Sync {
    /// Insert a lead, replacing any lead with the same handle in place.
    fn store_lead(&self, lead: LeadRecord) -> anyhow::Result<()>;

    /// Append a message to the message log.
    fn store_message(&self, message: MessageRecord) -> anyhow::Result<()>;

    /// Stamp the lead's last outbound DM time. Returns false for unknown handles.
    fn update_lead_last_message_sent(&self, twitter_handle: &str) -> anyhow::Result<bool>;

    /// Mark the lead as having replied. Returns false for unknown handles.
    fn update_lead_replied(&self, twitter_handle: &str) -> anyhow::Result<bool>;

    /// All leads in insertion order.
    fn all_leads(&self) -> anyhow::Result<Vec<LeadRecord>>;

    /// All messages in the order they were stored.
    fn all_messages(&self) -> anyhow::Result<Vec<MessageRecord>>;
}

#[derive(Debug, Default)]
struct Records {
    leads: Vec<LeadRecord>,
    by_handle: HashMap<String, usize>,
    messages: Vec<MessageRecord>,
}

impl Records {
    fn lead_mut(&mut self, twitter_handle: &str) -> Option<&mut LeadRecord> {
        let index = *self.by_handle.get(twitter_handle)?;
        self.leads.get_mut(index)
    }
}

/// In-memory store for testing and development.
/// Records are not persisted between process restarts.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Records>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> anyhow::Result<std::sync::RwLockWriteGuard<'_, Records>> {
        self.records
            .write()
            .map_err(|_| anyhow::anyhow!("Failed to acquire write lock on in-memory store"))
    }

    fn read(&self) -> anyhow::Result<std::sync::RwLockReadGuard<'_, Records>> {
        self.records
            .read()
            .map_err(|_| anyhow::anyhow!("Failed to acquire read lock on in-memory store"))
    }
}

impl RecordStore for InMemoryStore {
    fn store_lead(&self, lead: LeadRecord) -> anyhow::Result<()> {
        let mut records = self.write()?;
        let handle = lead.twitter_handle.clone();
        match records.by_handle.get(&handle).copied() {
            Some(index) => records.leads[index] = lead,
            None => {
                let index = records.leads.len();
                records.leads.push(lead);
                records.by_handle.insert(handle.clone(), index);
            }
        }
        tracing::debug!(twitter_handle = %handle, "Stored lead");
        Ok(())
    }

    fn store_message(&self, message: MessageRecord) -> anyhow::Result<()> {
        let mut records = self.write()?;
        tracing::debug!(
            twitter_handle = %message.twitter_handle,
            direction = %message.direction,
            "Stored message"
        );
        records.messages.push(message);
        Ok(())
    }

    fn update_lead_last_message_sent(&self, twitter_handle: &str) -> anyhow::Result<bool> {
        let mut records = self.write()?;
        match records.lead_mut(twitter_handle) {
            Some(lead) => {
                lead.last_message_sent =
                    Some(chrono::Local::now().format(LAST_MESSAGE_FORMAT).to_string());
                Ok(true)
            }
            None => {
                tracing::debug!(twitter_handle, "No lead to stamp with last message time");
                Ok(false)
            }
        }
    }

    fn update_lead_replied(&self, twitter_handle: &str) -> anyhow::Result<bool> {
        let mut records = self.write()?;
        match records.lead_mut(twitter_handle) {
            Some(lead) => {
                lead.replied = true;
                Ok(true)
            }
            None => {
                tracing::debug!(twitter_handle, "Reply from unknown lead");
                Ok(false)
            }
        }
    }

    fn all_leads(&self) -> anyhow::Result<Vec<LeadRecord>> {
        Ok(self.read()?.leads.clone())
    }

    fn all_messages(&self) -> anyhow::Result<Vec<MessageRecord>> {
        Ok(self.read()?.messages.clone())
    }
}
