//! Core logic including mortgage math, tool registry, agent definitions, etc.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod agent;
pub mod money;
pub mod mortgage;
pub mod tool;

pub use agent::{AgentDefinition, Roster, RosterError, ToolChoice, ToolUseBehavior};
pub use money::format_usd;
pub use mortgage::{LoanQuoteRequest, LoanQuoteResult, QuoteError, monthly_payment};
pub use tool::{Registry, Tool, ToolCall, ToolDefinition, ToolOutput, ToolResult};
