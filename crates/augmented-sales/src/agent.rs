//! The sales agent: dependencies, tools, prompt and output validator.

use std::sync::Arc;

use anyhow::Context;
use augmented_core::{Agent, ModelRetry, RunContext};
use augmented_toolkit::{system_prompt, tool, validator};
use serde::{Deserialize, Serialize};

use crate::models::{IcpFilters, LeadRecord, MessageRecord};
use crate::store::RecordStore;
use crate::twitter::TwitterApi;

pub const SALES_MODEL: &str = "openai:gpt-3.5-turbo";

pub const SALES_SYSTEM_PROMPT: &str = "You are a sales agent. You will identify leads on Twitter that match the provided ICP filters, \
send them a helpful DM, and watch for responses. \
Only send one initial DM, do not continue messaging if the user responds (positive or negative).";

/// Everything the sales tools need: ICP filters, the record store and the
/// Twitter client.
#[derive(Clone)]
pub struct SalesDependencies {
    pub icp_filters: IcpFilters,
    pub db: Arc<dyn RecordStore>,
    pub twitter: Arc<dyn TwitterApi>,
}

impl SalesDependencies {
    pub fn new(
        icp_filters: IcpFilters,
        db: Arc<dyn RecordStore>,
        twitter: Arc<dyn TwitterApi>,
    ) -> Self {
        Self {
            icp_filters,
            db,
            twitter,
        }
    }
}

/// Result of a sales tool run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SalesOutput {
    Leads(Vec<LeadRecord>),
    Sent(bool),
    Replies(Vec<MessageRecord>),
    Text(String),
}

pub type SalesAgent = Agent<SalesDependencies, SalesOutput>;

/// Dynamic prompt describing the active ICP filters.
pub fn include_icp_details(ctx: &RunContext<SalesDependencies>) -> String {
    format!("The ICP filters are: {}", ctx.deps.icp_filters)
}

/// Searches Twitter for prospects matching the ICP filters and stores up to `count` of them as leads
#[tool]
pub fn find_leads(ctx: &RunContext<SalesDependencies>, count: usize) -> anyhow::Result<SalesOutput> {
    let prospects = ctx
        .deps
        .twitter
        .search_prospects(&ctx.deps.icp_filters, count)
        .context("prospect search failed")?;

    let mut leads = Vec::with_capacity(prospects.len());
    for prospect in prospects {
        let lead = LeadRecord {
            twitter_handle: prospect.twitter_handle,
            bio: prospect.bio,
            followers: prospect.followers,
            icp_match: prospect.icp_match,
            last_message_sent: None,
            replied: false,
        };
        ctx.deps.db.store_lead(lead.clone())?;
        leads.push(lead);
    }

    tracing::info!(count = leads.len(), "stored new leads");
    Ok(SalesOutput::Leads(leads))
}

/// Sends a DM to the given handle and logs it as an outbound message
#[tool]
pub fn outreach_lead(
    ctx: &RunContext<SalesDependencies>,
    twitter_handle: String,
    message: String,
) -> anyhow::Result<SalesOutput> {
    let sent = ctx
        .deps
        .twitter
        .send_dm(&twitter_handle, &message)
        .with_context(|| format!("failed to DM {twitter_handle}"))?;

    if sent {
        ctx.deps
            .db
            .store_message(MessageRecord::outbound(twitter_handle.clone(), message))?;
        ctx.deps.db.update_lead_last_message_sent(&twitter_handle)?;
    } else {
        tracing::warn!(%twitter_handle, "DM was not delivered");
    }
    Ok(SalesOutput::Sent(sent))
}

/// Checks the inbox for replies, stores them and marks the senders as replied
#[tool]
pub fn check_responses(ctx: &RunContext<SalesDependencies>) -> anyhow::Result<SalesOutput> {
    let inbound = ctx
        .deps
        .twitter
        .check_inbox(None)
        .context("inbox check failed")?;

    let mut messages = Vec::with_capacity(inbound.len());
    for message in inbound {
        let record = MessageRecord::inbound(message.sender_handle, message.text);
        ctx.deps.db.store_message(record.clone())?;
        ctx.deps.db.update_lead_replied(&record.twitter_handle)?;
        messages.push(record);
    }

    tracing::info!(count = messages.len(), "recorded replies");
    Ok(SalesOutput::Replies(messages))
}

/// Rejects runs that produced nothing, or only blank text.
pub fn ensure_output(
    _ctx: &RunContext<SalesDependencies>,
    result: Option<SalesOutput>,
) -> Result<SalesOutput, ModelRetry> {
    match result {
        Some(SalesOutput::Text(text)) if text.trim().is_empty() => Err(ModelRetry::new(
            "The output must be a non-empty result. Try again.",
        )),
        Some(output) => Ok(output),
        None => Err(ModelRetry::new(
            "The output must be a non-empty result. Try again.",
        )),
    }
}

/// Build the sales agent with its prompt, tools and validator registered.
pub fn sales_agent() -> SalesAgent {
    let mut agent = Agent::new(SALES_MODEL, SALES_SYSTEM_PROMPT);
    agent.system_prompt(system_prompt(include_icp_details));
    agent.tool(FindLeadsTool::as_tool());
    agent.tool(OutreachLeadTool::as_tool());
    agent.tool(CheckResponsesTool::as_tool());
    agent.result_validator(validator("ensure_output", ensure_output));
    agent
}
