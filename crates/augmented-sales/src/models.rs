use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Ideal-customer-profile filters used to search for leads (e.g. role, region).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IcpFilters(BTreeMap<String, String>);

impl IcpFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `key=value` pairs joined by `, `, ordered by key.
impl fmt::Display for IcpFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.iter().map(|(k, v)| format!("{k}={v}")).collect();
        f.write_str(&pairs.join(", "))
    }
}

impl<K, V> FromIterator<(K, V)> for IcpFilters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A prospect we found and may reach out to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub twitter_handle: String,
    pub bio: String,
    pub followers: u64,
    pub icp_match: bool,
    /// Local timestamp of the last outbound DM, if any.
    pub last_message_sent: Option<String>,
    pub replied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Inbound => f.write_str("inbound"),
            Direction::Outbound => f.write_str("outbound"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub twitter_handle: String,
    pub direction: Direction,
    pub content: String,
}

impl MessageRecord {
    pub fn inbound(twitter_handle: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            twitter_handle: twitter_handle.into(),
            direction: Direction::Inbound,
            content: content.into(),
        }
    }

    pub fn outbound(twitter_handle: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            twitter_handle: twitter_handle.into(),
            direction: Direction::Outbound,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn icp_filters_describe_in_key_order() {
        let filters = IcpFilters::new().with("role", "CEO").with("region", "US");
        assert_eq!(filters.to_string(), "region=US, role=CEO");
        assert_eq!(filters.get("role"), Some("CEO"));
        assert_eq!(serde_json::to_value(&filters).unwrap(), json!({"region": "US", "role": "CEO"}));
    }

    #[test]
    fn direction_serializes_snake_case() {
        let message = MessageRecord::outbound("prospect_0", "hello");
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({"twitter_handle": "prospect_0", "direction": "outbound", "content": "hello"})
        );
        assert_eq!(Direction::Inbound.to_string(), "inbound");
    }
}
