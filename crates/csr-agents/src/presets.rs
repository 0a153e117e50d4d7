//! Ready-made agent rosters for the demo scenarios.

use csr_agents_core::agent::{AgentDefinition, ToolChoice, ToolUseBehavior};
use rand::Rng;

use crate::scenario::CustomerContext;

/// Name of the agent that greets campervan customers.
pub const CSR_AGENT: &str = "CSR";
/// Name of the agent handling cancellations.
pub const RETENTION_AGENT: &str = "Retention Customer Agent";
/// Name of the agent issuing invoices.
pub const INVOICING_AGENT: &str = "Invoicing Agent";
/// Name of the agent filing refunds.
pub const REFUND_AGENT: &str = "Rental Refund Agent";

/// A demo scenario.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Demo {
    /// Campervan customer service with hand-offs.
    #[default]
    Csr,
    /// A single agent quoting mortgage payments.
    Mortgage,
    /// A single agent reporting crypto prices.
    Crypto,
    /// A plain assistant without tools.
    Assistant,
}

impl Demo {
    /// All demos.
    pub const ALL: [Demo; 4] =
        [Demo::Csr, Demo::Mortgage, Demo::Crypto, Demo::Assistant];

    /// Returns the demo name.
    pub fn name(&self) -> &'static str {
        match self {
            Demo::Csr => "csr",
            Demo::Mortgage => "mortgage",
            Demo::Crypto => "crypto",
            Demo::Assistant => "assistant",
        }
    }

    /// Returns the names of the tools a session of the demo can call.
    pub fn tools(&self) -> &'static [&'static str] {
        match self {
            Demo::Csr => &[
                "get_booking_status",
                "get_rental_invoice",
                "process_rental_refund",
            ],
            Demo::Mortgage => &["calculate_mortgage"],
            Demo::Crypto => &["get_crypto_prices", "get_price"],
            Demo::Assistant => &[],
        }
    }

    /// Returns the agents of the demo, entry agent first.
    pub fn agents(&self) -> Vec<AgentDefinition> {
        match self {
            Demo::Csr => csr_agents(),
            Demo::Mortgage => vec![
                AgentDefinition::new("mortgage_agent", "You are a mortgage assistant")
                    .with_tool("calculate_mortgage")
                    .with_tool_choice(ToolChoice::Required)
                    .with_tool_use_behavior(ToolUseBehavior::StopOnFirstTool),
            ],
            Demo::Crypto => vec![
                AgentDefinition::new(
                    "cryptonAgent",
                    "You are a crypto assistant. Use tools to get real-time data. \
                     When getting cryptocurrency prices, call the tool only once \
                     for all requests.",
                )
                .with_tool("get_crypto_prices"),
            ],
            Demo::Assistant => {
                vec![AgentDefinition::new("Assistant", "You are a helpful assistant")]
            }
        }
    }

    /// Returns the first user message of the demo.
    ///
    /// The customer service demo draws a random customer, the others always
    /// ask the same question.
    pub fn user_message<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        match self {
            Demo::Csr => CustomerContext::random(rng).message(),
            Demo::Mortgage => "What is my monthly payments if I borrow $800,000 \
                               at 7% interest for 30 years?"
                .to_owned(),
            Demo::Crypto => "What is the price of bitcoin and ethereum".to_owned(),
            Demo::Assistant => {
                "How to create a Drone for perimeter surveillance".to_owned()
            }
        }
    }
}

fn csr_agents() -> Vec<AgentDefinition> {
    vec![
        AgentDefinition::new(
            CSR_AGENT,
            "You help with campervan bookings. When a booking ID is provided, \
             call get_booking_status before replying or escalating.",
        )
        .with_tool("get_booking_status")
        .with_handoff(RETENTION_AGENT)
        .with_handoff(INVOICING_AGENT)
        .with_handoff(REFUND_AGENT)
        .with_tool_choice(ToolChoice::Required),
        AgentDefinition::new(
            RETENTION_AGENT,
            "You are an AI agent that responds to customers who want to cancel \
             their booking. Be very courteous, relatable, and kind. Offer \
             discounts up to 10% if it helps.",
        ),
        AgentDefinition::new(
            INVOICING_AGENT,
            "Generate and return an invoice when requested",
        )
        .with_tool("get_rental_invoice")
        .with_tool_use_behavior(ToolUseBehavior::StopAtTools(vec![
            "get_rental_invoice".to_owned(),
        ])),
        AgentDefinition::new(
            REFUND_AGENT,
            "You are an AI agent that responds to customers who want to refund \
             their booking payment. Be very courteous",
        )
        .with_tool("process_rental_refund")
        .with_tool_choice(ToolChoice::Required)
        .with_tool_use_behavior(ToolUseBehavior::StopAtTools(vec![
            "process_rental_refund".to_owned(),
        ])),
    ]
}
