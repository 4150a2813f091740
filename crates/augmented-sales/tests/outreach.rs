use std::sync::Arc;

use augmented_core::{AgentError, FunctionCall};
use augmented_sales::{
    run_outreach, sales_agent, IcpFilters, InMemoryStore, InboxMessage, MockLatency,
    MockTwitter, OutreachConfig, Prospect, RecordStore, SalesDependencies, SalesOutput,
    TwitterApi,
};
use serde_json::json;

fn offline_deps(config: &OutreachConfig) -> (SalesDependencies, Arc<InMemoryStore>, Arc<MockTwitter>) {
    let store = Arc::new(InMemoryStore::new());
    let twitter = Arc::new(MockTwitter::new().with_latency(MockLatency::none()));
    let deps = SalesDependencies::new(config.icp_filters(), store.clone(), twitter.clone());
    (deps, store, twitter)
}

#[test]
fn find_leads_stores_requested_count() {
    let config = OutreachConfig::new();
    let (deps, store, _) = offline_deps(&config);
    let agent = sales_agent();

    let result = agent
        .run_sync(
            deps,
            Some(FunctionCall::new("find_leads", json!({ "count": 3 }))),
        )
        .unwrap();

    let leads = match result.into_data() {
        Some(SalesOutput::Leads(leads)) => leads,
        other => panic!("expected leads, got {other:?}"),
    };
    assert_eq!(leads.len(), 3);
    assert_eq!(leads[0].twitter_handle, "prospect_0");
    assert!(leads.iter().all(|lead| !lead.replied));
    assert_eq!(store.all_leads().unwrap().len(), 3);
}

#[test]
fn full_outreach_finds_the_replying_lead() {
    let config = OutreachConfig::new();
    let (deps, store, twitter) = offline_deps(&config);
    let agent = sales_agent();

    let report = run_outreach(&agent, &deps, &config).unwrap();

    assert_eq!(report.leads_found.len(), 3);
    assert_eq!(
        report.messages_sent,
        vec!["prospect_0", "prospect_1", "prospect_2"]
    );
    assert!(report.failed_sends.is_empty());
    assert_eq!(report.replies.len(), 1);
    assert_eq!(report.replied_leads, vec!["prospect_1"]);

    let sent = twitter.sent_messages();
    assert_eq!(sent.len(), 3);
    assert_eq!(
        sent[0].1,
        "Hi prospect_0, we have a great tip for CEOs in US. Interested?"
    );
    // three outbound DMs plus one inbound reply
    assert_eq!(store.all_messages().unwrap().len(), 4);
    assert!(store
        .all_leads()
        .unwrap()
        .iter()
        .all(|lead| lead.last_message_sent.is_some()));
}

#[test]
fn empty_run_requests_a_retry() {
    let config = OutreachConfig::new();
    let (deps, _, _) = offline_deps(&config);
    let agent = sales_agent();

    let err = agent.run_sync(deps, None).unwrap_err();
    assert!(matches!(err, AgentError::RetryRequested(_)));
}

#[test]
fn unknown_tool_is_reported() {
    let config = OutreachConfig::new();
    let (deps, store, _) = offline_deps(&config);
    let agent = sales_agent();

    let err = agent
        .run_sync(deps, Some(FunctionCall::no_args("follow_lead")))
        .unwrap_err();
    assert!(matches!(err, AgentError::ToolNotFound { ref name } if name == "follow_lead"));
    assert!(store.all_leads().unwrap().is_empty());
}

/// Twitter client whose DMs never get delivered.
struct Undeliverable;

impl TwitterApi for Undeliverable {
    fn search_prospects(
        &self,
        _filters: &IcpFilters,
        max_results: usize,
    ) -> anyhow::Result<Vec<Prospect>> {
        Ok((0..max_results)
            .map(|i| Prospect {
                twitter_handle: format!("lead_{i}"),
                bio: "founder".to_string(),
                followers: 10,
                icp_match: true,
            })
            .collect())
    }

    fn send_dm(&self, _twitter_handle: &str, _message: &str) -> anyhow::Result<bool> {
        Ok(false)
    }

    fn check_inbox(&self, _since_id: Option<&str>) -> anyhow::Result<Vec<InboxMessage>> {
        Ok(Vec::new())
    }
}

#[test]
fn undelivered_dms_are_reported_not_recorded() {
    let config = OutreachConfig::new().with_lead_count(2);
    let store = Arc::new(InMemoryStore::new());
    let deps = SalesDependencies::new(config.icp_filters(), store.clone(), Arc::new(Undeliverable));
    let agent = sales_agent();

    let report = run_outreach(&agent, &deps, &config).unwrap();

    assert!(report.messages_sent.is_empty());
    assert_eq!(report.failed_sends, vec!["lead_0", "lead_1"]);
    assert!(report.replied_leads.is_empty());
    assert!(store.all_messages().unwrap().is_empty());
    assert!(store
        .all_leads()
        .unwrap()
        .iter()
        .all(|lead| lead.last_message_sent.is_none()));
}
