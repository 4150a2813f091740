//! A toy sales-outreach agent: find leads on a (mocked) Twitter, send each a
//! direct message, and record who replied in an in-memory store.
//!
//! The agent itself is an [`augmented_core::Agent`]; everything in this crate
//! is a consumer of the agent core.

pub mod agent;
pub mod config;
pub mod models;
pub mod store;
pub mod twitter;
pub mod workflow;

pub use agent::{sales_agent, SalesAgent, SalesDependencies, SalesOutput};
pub use config::OutreachConfig;
pub use models::{Direction, IcpFilters, LeadRecord, MessageRecord};
pub use store::{InMemoryStore, RecordStore};
pub use twitter::{InboxMessage, MockLatency, MockTwitter, Prospect, TwitterApi};
pub use workflow::{run_outreach, OutreachReport};
