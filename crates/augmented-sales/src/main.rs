//! `sales-agent`: find leads, message them, and check who replied.

use std::sync::Arc;

use augmented_core::RunContext;
use augmented_sales::{
    run_outreach, sales_agent, InMemoryStore, MockLatency, MockTwitter, OutreachConfig,
    SalesDependencies,
};
use augmented_toolkit::RetryPolicy;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "sales-agent",
    about = "Run the sales agent to find and message leads",
    version
)]
struct Cli {
    /// Role filter for the ideal customer profile
    #[arg(long, default_value = "CEO", env = "SALES_ROLE")]
    role: String,

    /// Region filter for the ideal customer profile
    #[arg(long, default_value = "US", env = "SALES_REGION")]
    region: String,

    /// Number of leads to fetch
    #[arg(long, default_value_t = 3, env = "SALES_LEAD_COUNT")]
    count: usize,

    /// Attempts per step when the result validator asks for a retry
    #[arg(long, default_value_t = 3)]
    max_attempts: u32,

    /// Skip the simulated network delay of the mock Twitter client
    #[arg(long)]
    no_latency: bool,

    /// Print the registered tools and exit
    #[arg(long)]
    list_tools: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let agent = sales_agent();

    if cli.list_tools {
        for schema in agent.tool_schemas() {
            println!("{:<16} {}", schema.name, schema.description);
        }
        return Ok(());
    }

    let config = OutreachConfig::new()
        .with_role(cli.role)
        .with_region(cli.region)
        .with_lead_count(cli.count)
        .with_retry_policy(RetryPolicy::new(cli.max_attempts));

    let latency = if cli.no_latency {
        MockLatency::none()
    } else {
        MockLatency::default()
    };
    let store = Arc::new(InMemoryStore::new());
    let twitter = Arc::new(MockTwitter::new().with_latency(latency));
    let deps = SalesDependencies::new(config.icp_filters(), store, twitter);

    tracing::debug!(
        model = agent.model(),
        instructions = %agent.instructions(&RunContext::new(deps.clone())),
        "agent configured"
    );

    println!("=== Starting Sales Agent ===");
    let report = run_outreach(&agent, &deps, &config)?;

    let handles: Vec<&str> = report
        .leads_found
        .iter()
        .map(|lead| lead.twitter_handle.as_str())
        .collect();
    println!("Find leads result => {}", handles.join(", "));
    println!("Sent {} outreach messages", report.messages_sent.len());
    for handle in &report.failed_sends {
        println!("Could not message {handle}");
    }

    println!("All leads who replied so far:");
    for handle in &report.replied_leads {
        println!("Lead {handle} has replied!");
    }

    Ok(())
}
