//! Twitter client seam and the mock used in place of the real API.

use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::IcpFilters;

/// A search hit returned by [`TwitterApi::search_prospects`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prospect {
    pub twitter_handle: String,
    pub bio: String,
    pub followers: u64,
    pub icp_match: bool,
}

/// A direct message received in the inbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    pub id: String,
    pub sender_handle: String,
    pub text: String,
    /// Unix timestamp in seconds.
    pub timestamp: i64,
}

/// The three Twitter operations the sales tools rely on.
pub trait TwitterApi: Send + Sync {
    /// Find up to `max_results` prospects matching the filters.
    fn search_prospects(
        &self,
        filters: &IcpFilters,
        max_results: usize,
    ) -> anyhow::Result<Vec<Prospect>>;

    /// Send a DM. Returns whether it was delivered.
    fn send_dm(&self, twitter_handle: &str, message: &str) -> anyhow::Result<bool>;

    /// Messages received after `since_id`, or all of them when `None`.
    fn check_inbox(&self, since_id: Option<&str>) -> anyhow::Result<Vec<InboxMessage>>;
}

/// Simulated network delay per mock call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub search: Duration,
    pub send_dm: Duration,
    pub inbox: Duration,
}

impl MockLatency {
    pub fn none() -> Self {
        Self {
            search: Duration::ZERO,
            send_dm: Duration::ZERO,
            inbox: Duration::ZERO,
        }
    }
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            search: Duration::from_secs(1),
            send_dm: Duration::from_millis(500),
            inbox: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone)]
struct QueuedReply {
    id: String,
    sender_handle: String,
    text: String,
}

/// Offline stand-in for the Twitter API.
///
/// Search returns `prospect_0..prospect_{n-1}`, every DM succeeds, and the
/// inbox holds a single reply from `prospect_1` unless replaced with
/// [`MockTwitter::with_replies`].
#[derive(Debug)]
pub struct MockTwitter {
    latency: MockLatency,
    replies: Vec<QueuedReply>,
    sent: Mutex<Vec<(String, String)>>,
}

impl MockTwitter {
    pub fn new() -> Self {
        Self {
            latency: MockLatency::default(),
            replies: vec![QueuedReply {
                id: "msg_1".to_string(),
                sender_handle: "prospect_1".to_string(),
                text: "Thanks for reaching out!".to_string(),
            }],
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn with_latency(mut self, latency: MockLatency) -> Self {
        self.latency = latency;
        self
    }

    /// Replace the inbox with `(id, sender_handle, text)` entries, oldest first.
    pub fn with_replies<I, S>(mut self, replies: I) -> Self
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: Into<String>,
    {
        self.replies = replies
            .into_iter()
            .map(|(id, sender_handle, text)| QueuedReply {
                id: id.into(),
                sender_handle: sender_handle.into(),
                text: text.into(),
            })
            .collect();
        self
    }

    /// DMs sent so far as `(handle, message)` pairs.
    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    fn pause(duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

impl Default for MockTwitter {
    fn default() -> Self {
        Self::new()
    }
}

impl TwitterApi for MockTwitter {
    fn search_prospects(
        &self,
        filters: &IcpFilters,
        max_results: usize,
    ) -> anyhow::Result<Vec<Prospect>> {
        Self::pause(self.latency.search);
        tracing::debug!(%filters, max_results, "[mock] searching prospects");
        Ok((0..max_results)
            .map(|i| Prospect {
                twitter_handle: format!("prospect_{i}"),
                bio: "Bio text for prospect".to_string(),
                followers: 100 + i as u64,
                icp_match: true,
            })
            .collect())
    }

    fn send_dm(&self, twitter_handle: &str, message: &str) -> anyhow::Result<bool> {
        Self::pause(self.latency.send_dm);
        tracing::info!(twitter_handle, message, "[mock] sent DM");
        self.sent
            .lock()
            .map_err(|_| anyhow::anyhow!("Failed to acquire lock on sent DMs"))?
            .push((twitter_handle.to_string(), message.to_string()));
        Ok(true)
    }

    fn check_inbox(&self, since_id: Option<&str>) -> anyhow::Result<Vec<InboxMessage>> {
        Self::pause(self.latency.inbox);
        let start = since_id
            .and_then(|id| self.replies.iter().position(|reply| reply.id == id))
            .map(|pos| pos + 1)
            .unwrap_or(0);
        let now = chrono::Utc::now().timestamp();
        Ok(self.replies[start..]
            .iter()
            .map(|reply| InboxMessage {
                id: reply.id.clone(),
                sender_handle: reply.sender_handle.clone(),
                text: reply.text.clone(),
                timestamp: now,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock() -> MockTwitter {
        MockTwitter::new().with_latency(MockLatency::none())
    }

    #[test]
    fn search_returns_requested_count() {
        let prospects = mock()
            .search_prospects(&IcpFilters::new().with("role", "CTO"), 3)
            .unwrap();
        let handles: Vec<&str> = prospects.iter().map(|p| p.twitter_handle.as_str()).collect();
        assert_eq!(handles, vec!["prospect_0", "prospect_1", "prospect_2"]);
        assert_eq!(prospects[2].followers, 102);
        assert!(prospects.iter().all(|p| p.icp_match));
    }

    #[test]
    fn send_dm_records_message() {
        let twitter = mock();
        assert!(twitter.send_dm("prospect_0", "hello").unwrap());
        assert_eq!(
            twitter.sent_messages(),
            vec![("prospect_0".to_string(), "hello".to_string())]
        );
    }

    #[test]
    fn inbox_honours_since_id() {
        let twitter = mock().with_replies([
            ("m1", "prospect_0", "hi"),
            ("m2", "prospect_2", "tell me more"),
        ]);
        assert_eq!(twitter.check_inbox(None).unwrap().len(), 2);

        let newer = twitter.check_inbox(Some("m1")).unwrap();
        assert_eq!(newer.len(), 1);
        assert_eq!(newer[0].sender_handle, "prospect_2");

        assert!(twitter.check_inbox(Some("m2")).unwrap().is_empty());
        assert_eq!(twitter.check_inbox(Some("unknown")).unwrap().len(), 2);
    }

    #[test]
    fn default_inbox_has_one_reply() {
        let inbox = mock().check_inbox(None).unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].id, "msg_1");
        assert_eq!(inbox[0].sender_handle, "prospect_1");
        assert_eq!(inbox[0].text, "Thanks for reaching out!");
    }
}
