use csr_agents_core::agent::{AgentDefinition, Roster, RosterError};
use csr_agents_core::tool::{Registry, ToolCall, ToolDefinition, ToolOutput};
use rand::Rng;

use crate::presets::Demo;
use crate::tools::{self, CoinGeckoClient, PriceSource};

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder<S = CoinGeckoClient> {
    demo: Demo,
    model: Option<String>,
    price_source: S,
}

impl SessionBuilder {
    /// Creates a session builder for a demo, with prices from CoinGecko.
    pub fn for_demo(demo: Demo) -> Self {
        Self {
            demo,
            model: None,
            price_source: CoinGeckoClient::new(),
        }
    }
}

impl<S: PriceSource + Clone> SessionBuilder<S> {
    /// Pins every agent to a model (the deployment name on Azure).
    #[inline]
    pub fn with_model<M: Into<String>>(mut self, model: M) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Replaces the source the price tools read from.
    #[inline]
    pub fn with_price_source<T: PriceSource + Clone>(
        self,
        price_source: T,
    ) -> SessionBuilder<T> {
        SessionBuilder {
            demo: self.demo,
            model: self.model,
            price_source,
        }
    }

    /// Builds a new session.
    ///
    /// Only the demo's own tools are registered. Fails if the demo's agents
    /// reference each other or their tools inconsistently.
    pub fn build(self) -> Result<Session, RosterError> {
        let mut agents = self.demo.agents();
        if let Some(model) = &self.model {
            agents = agents
                .into_iter()
                .map(|agent| agent.with_model(model.clone()))
                .collect();
        }

        let roster = Roster::new(agents)?;
        let mut registry = tools::registry(self.price_source);
        let demo_tools = self.demo.tools();
        registry.retain(|name| demo_tools.contains(&name));
        roster.validate_tools(&registry)?;

        debug!(
            "session for `{}` demo with {} agents and {} tools",
            self.demo.name(),
            roster.agents().len(),
            registry.len()
        );
        Ok(Session {
            demo: self.demo,
            roster,
            registry,
        })
    }
}

/// A demo session: a validated roster together with the tools it calls.
///
/// Running the agents against a model is up to the host. The session
/// answers what the host needs for that: which agent starts, which tools
/// each agent is offered, and what a tool call returns.
pub struct Session {
    demo: Demo,
    roster: Roster,
    registry: Registry,
}

impl Session {
    /// Returns the demo this session was built for.
    #[inline]
    pub fn demo(&self) -> Demo {
        self.demo
    }

    /// Returns the roster.
    #[inline]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Returns the tool registry.
    #[inline]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the agent that receives the first user message.
    #[inline]
    pub fn entry_agent(&self) -> &AgentDefinition {
        self.roster.entry()
    }

    /// Returns the tools offered to the entry agent.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.roster
            .tool_definitions(self.entry_agent(), &self.registry)
    }

    /// Returns the tools offered to the named agent.
    pub fn tool_definitions_for(&self, agent: &str) -> Option<Vec<ToolDefinition>> {
        let agent = self.roster.get(agent)?;
        Some(self.roster.tool_definitions(agent, &self.registry))
    }

    /// Returns the first user message of the demo.
    #[inline]
    pub fn user_message<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.demo.user_message(rng)
    }

    /// Calls a tool.
    pub async fn call_tool(&self, call: ToolCall) -> ToolOutput {
        self.registry.call(call).await
    }
}
