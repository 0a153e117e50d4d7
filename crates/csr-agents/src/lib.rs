//! Customer service agents for a campervan rental business, plus a few
//! single-agent demos (mortgage quotes, crypto prices).
//!
//! The crate includes a CLI tool for inspecting the demos in the terminal.
//! Running the agents against a model is left to the host; this crate
//! provides the agent definitions, their tools and the Azure settings.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod presets;
pub mod scenario;
mod session;
pub mod tools;

pub use config::{AzureConfig, AzureConfigBuilder, ConfigError};
pub use presets::Demo;
pub use scenario::CustomerContext;
pub use session::{Session, SessionBuilder};

/// Re-exports of [`csr_agents_core`] crate.
pub mod core {
    pub use csr_agents_core::*;
}
