//! Configuration for an outreach run.

use augmented_toolkit::RetryPolicy;

use crate::models::IcpFilters;

/// Settings for [`run_outreach`](crate::workflow::run_outreach).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutreachConfig {
    pub role: String,
    pub region: String,
    pub lead_count: usize,
    pub retry: RetryPolicy,
}

impl OutreachConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_lead_count(mut self, lead_count: usize) -> Self {
        self.lead_count = lead_count;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn icp_filters(&self) -> IcpFilters {
        IcpFilters::new()
            .with("role", self.role.clone())
            .with("region", self.region.clone())
    }

    /// The opening DM sent to every lead.
    pub fn outreach_message(&self, twitter_handle: &str) -> String {
        format!(
            "Hi {}, we have a great tip for {}s in {}. Interested?",
            twitter_handle, self.role, self.region
        )
    }
}

impl Default for OutreachConfig {
    fn default() -> Self {
        Self {
            role: "CEO".to_string(),
            region: "US".to_string(),
            lead_count: 3,
            retry: RetryPolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_mentions_role_and_region() {
        let config = OutreachConfig::new().with_role("CTO").with_region("EU");
        assert_eq!(
            config.outreach_message("prospect_0"),
            "Hi prospect_0, we have a great tip for CTOs in EU. Interested?"
        );
        assert_eq!(config.icp_filters().to_string(), "region=EU, role=CTO");
    }
}
