//! End-to-end outreach: find leads, DM each stored lead, then check replies.
//!
//! Every step is one `run_sync` call on the sales agent, wrapped in the
//! caller-side retry loop.

use anyhow::Context;
use augmented_core::FunctionCall;
use augmented_toolkit::run_with_retries;
use serde::Serialize;
use serde_json::json;

use crate::agent::{SalesAgent, SalesDependencies, SalesOutput};
use crate::config::OutreachConfig;
use crate::models::{LeadRecord, MessageRecord};

/// What happened during one outreach run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutreachReport {
    pub leads_found: Vec<LeadRecord>,
    /// Handles that received a DM.
    pub messages_sent: Vec<String>,
    /// Handles whose DM was not delivered.
    pub failed_sends: Vec<String>,
    pub replies: Vec<MessageRecord>,
    /// Handles of every stored lead that has replied so far.
    pub replied_leads: Vec<String>,
}

fn run_step(
    agent: &SalesAgent,
    deps: &SalesDependencies,
    config: &OutreachConfig,
    call: FunctionCall,
) -> anyhow::Result<SalesOutput> {
    let name = call.name.clone();
    let result = run_with_retries(agent, &config.retry, |_| deps.clone(), Some(call))
        .with_context(|| format!("{name} failed"))?;
    result
        .into_data()
        .with_context(|| format!("{name} produced no output"))
}

pub fn run_outreach(
    agent: &SalesAgent,
    deps: &SalesDependencies,
    config: &OutreachConfig,
) -> anyhow::Result<OutreachReport> {
    let mut report = OutreachReport::default();

    let found = run_step(
        agent,
        deps,
        config,
        FunctionCall::new("find_leads", json!({ "count": config.lead_count })),
    )?;
    match found {
        SalesOutput::Leads(leads) => report.leads_found = leads,
        other => anyhow::bail!("find_leads returned unexpected output: {other:?}"),
    }
    tracing::info!(count = report.leads_found.len(), "found leads");

    for lead in deps.db.all_leads()? {
        let handle = lead.twitter_handle;
        let message = config.outreach_message(&handle);
        let sent = run_step(
            agent,
            deps,
            config,
            FunctionCall::new(
                "outreach_lead",
                json!({ "twitter_handle": handle, "message": message }),
            ),
        )?;
        match sent {
            SalesOutput::Sent(true) => report.messages_sent.push(handle),
            SalesOutput::Sent(false) => {
                tracing::warn!(twitter_handle = %handle, "outreach DM not delivered");
                report.failed_sends.push(handle);
            }
            other => anyhow::bail!("outreach_lead returned unexpected output: {other:?}"),
        }
    }

    let replies = run_step(
        agent,
        deps,
        config,
        FunctionCall::no_args("check_responses"),
    )?;
    match replies {
        SalesOutput::Replies(messages) => report.replies = messages,
        other => anyhow::bail!("check_responses returned unexpected output: {other:?}"),
    }

    report.replied_leads = deps
        .db
        .all_leads()?
        .into_iter()
        .filter(|lead| lead.replied)
        .map(|lead| lead.twitter_handle)
        .collect();
    tracing::info!(
        sent = report.messages_sent.len(),
        replied = report.replied_leads.len(),
        "outreach complete"
    );

    Ok(report)
}
