use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{self, Display};

use super::{AgentDefinition, ToolUseBehavior};
use crate::tool::{Registry, ToolDefinition};

/// A problem found while validating a [`Roster`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RosterError {
    /// The roster has no agents.
    Empty,
    /// Two agents share a name.
    DuplicateAgent(String),
    /// An agent hands off to an agent that is not in the roster.
    UnknownHandoff {
        /// The agent declaring the hand-off.
        agent: String,
        /// The missing target.
        target: String,
    },
    /// An agent hands off to itself.
    SelfHandoff(String),
    /// An agent stops at a tool it doesn't have.
    StopToolNotAttached {
        /// The agent declaring the behavior.
        agent: String,
        /// The tool name.
        tool: String,
    },
    /// An agent uses a tool that is not registered.
    UnknownTool {
        /// The agent using the tool.
        agent: String,
        /// The tool name.
        tool: String,
    },
}

impl Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Empty => write!(f, "roster has no agents"),
            RosterError::DuplicateAgent(name) => {
                write!(f, "agent `{name}` is defined more than once")
            }
            RosterError::UnknownHandoff { agent, target } => {
                write!(f, "agent `{agent}` hands off to unknown agent `{target}`")
            }
            RosterError::SelfHandoff(name) => {
                write!(f, "agent `{name}` hands off to itself")
            }
            RosterError::StopToolNotAttached { agent, tool } => write!(
                f,
                "agent `{agent}` stops at tool `{tool}` which it doesn't use"
            ),
            RosterError::UnknownTool { agent, tool } => {
                write!(f, "agent `{agent}` uses unregistered tool `{tool}`")
            }
        }
    }
}

impl Error for RosterError {}

/// A validated set of agents that may hand off to each other.
///
/// The first agent is the entry point of a conversation.
#[derive(Clone, Debug)]
pub struct Roster {
    agents: Vec<AgentDefinition>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Creates a roster, checking that the agents reference each other
    /// consistently.
    pub fn new(agents: Vec<AgentDefinition>) -> Result<Self, RosterError> {
        if agents.is_empty() {
            return Err(RosterError::Empty);
        }

        let mut index = HashMap::with_capacity(agents.len());
        for (idx, agent) in agents.iter().enumerate() {
            if index.insert(agent.name().to_owned(), idx).is_some() {
                return Err(RosterError::DuplicateAgent(agent.name().to_owned()));
            }
        }

        for agent in &agents {
            for target in agent.handoffs() {
                if target == agent.name() {
                    return Err(RosterError::SelfHandoff(target.clone()));
                }
                if !index.contains_key(target) {
                    return Err(RosterError::UnknownHandoff {
                        agent: agent.name().to_owned(),
                        target: target.clone(),
                    });
                }
            }

            if let ToolUseBehavior::StopAtTools(names) =
                agent.tool_use_behavior()
            {
                let tools: HashSet<_> = agent.tools().iter().collect();
                if let Some(tool) = names.iter().find(|n| !tools.contains(n)) {
                    return Err(RosterError::StopToolNotAttached {
                        agent: agent.name().to_owned(),
                        tool: tool.clone(),
                    });
                }
            }
        }

        Ok(Self { agents, index })
    }

    /// Checks that every tool the agents use is registered.
    pub fn validate_tools(&self, registry: &Registry) -> Result<(), RosterError> {
        for agent in &self.agents {
            if let Some(tool) =
                agent.tools().iter().find(|tool| !registry.contains(tool))
            {
                return Err(RosterError::UnknownTool {
                    agent: agent.name().to_owned(),
                    tool: tool.clone(),
                });
            }
        }
        Ok(())
    }

    /// Returns the agent that starts the conversation.
    #[inline]
    pub fn entry(&self) -> &AgentDefinition {
        &self.agents[0]
    }

    /// Looks up an agent by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&AgentDefinition> {
        self.index.get(name).map(|&idx| &self.agents[idx])
    }

    /// Returns all agents in declaration order.
    #[inline]
    pub fn agents(&self) -> &[AgentDefinition] {
        &self.agents
    }

    /// Returns the tools offered to `agent`: its own tools, followed by one
    /// hand-off tool per target.
    ///
    /// Tools missing from `registry` are skipped; call
    /// [`Roster::validate_tools`] first to rule them out.
    pub fn tool_definitions(
        &self,
        agent: &AgentDefinition,
        registry: &Registry,
    ) -> Vec<ToolDefinition> {
        let tools = agent
            .tools()
            .iter()
            .filter_map(|name| registry.definition(name));
        let handoffs = agent
            .handoffs()
            .iter()
            .filter_map(|name| self.get(name))
            .map(AgentDefinition::handoff_definition);
        tools.chain(handoffs).collect()
    }

    /// Finds the hand-off target behind a hand-off tool name.
    pub fn resolve_handoff(
        &self,
        agent: &AgentDefinition,
        tool_name: &str,
    ) -> Option<&AgentDefinition> {
        agent
            .handoffs()
            .iter()
            .filter_map(|name| self.get(name))
            .find(|target| target.handoff_tool_name() == tool_name)
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;
    use std::sync::LazyLock;

    use serde_json::{Value, json};

    use super::*;
    use crate::tool::{Tool, ToolResult};

    static SCHEMA: LazyLock<Value> =
        LazyLock::new(|| json!({ "type": "object" }));

    struct NamedTool(&'static str);

    impl Tool for NamedTool {
        type Input = Value;

        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "A test tool"
        }

        fn parameter_schema(&self) -> &Value {
            &SCHEMA
        }

        fn execute(
            &self,
            _input: Self::Input,
        ) -> impl Future<Output = ToolResult> + Send + 'static {
            ready(Ok(String::new()))
        }
    }

    fn front_desk() -> Vec<AgentDefinition> {
        vec![
            AgentDefinition::new("Front Desk", "Route requests")
                .with_tool("lookup")
                .with_handoff("Billing")
                .with_handoff("Support"),
            AgentDefinition::new("Billing", "Handle invoices")
                .with_tool("invoice")
                .with_tool_use_behavior(ToolUseBehavior::StopAtTools(vec![
                    "invoice".to_owned(),
                ])),
            AgentDefinition::new("Support", "Be kind"),
        ]
    }

    #[test]
    fn test_lookup() {
        let roster = Roster::new(front_desk()).unwrap();
        assert_eq!(roster.entry().name(), "Front Desk");
        assert_eq!(roster.agents().len(), 3);
        assert_eq!(roster.get("Billing").unwrap().tools(), ["invoice"]);
        assert!(roster.get("Nobody").is_none());
    }

    #[test]
    fn test_invalid_rosters() {
        assert_eq!(Roster::new(vec![]).unwrap_err(), RosterError::Empty);

        let mut agents = front_desk();
        agents.push(AgentDefinition::new("Support", "Again"));
        assert_eq!(
            Roster::new(agents).unwrap_err(),
            RosterError::DuplicateAgent("Support".to_owned())
        );

        let mut agents = front_desk();
        agents.push(AgentDefinition::new("Loop", "").with_handoff("Loop"));
        assert_eq!(
            Roster::new(agents).unwrap_err(),
            RosterError::SelfHandoff("Loop".to_owned())
        );

        let mut agents = front_desk();
        agents.push(AgentDefinition::new("Lost", "").with_handoff("Sales"));
        assert_eq!(
            Roster::new(agents).unwrap_err(),
            RosterError::UnknownHandoff {
                agent: "Lost".to_owned(),
                target: "Sales".to_owned(),
            }
        );

        let agents = vec![AgentDefinition::new("Stopper", "")
            .with_tool("a")
            .with_tool_use_behavior(ToolUseBehavior::StopAtTools(vec![
                "b".to_owned(),
            ]))];
        let err = Roster::new(agents).unwrap_err();
        assert_eq!(
            err.to_string(),
            "agent `Stopper` stops at tool `b` which it doesn't use"
        );
    }

    #[test]
    fn test_validate_tools() {
        let roster = Roster::new(front_desk()).unwrap();

        let registry = Registry::new().with_tool(NamedTool("lookup"));
        assert_eq!(
            roster.validate_tools(&registry).unwrap_err(),
            RosterError::UnknownTool {
                agent: "Billing".to_owned(),
                tool: "invoice".to_owned(),
            }
        );

        let registry = registry.with_tool(NamedTool("invoice"));
        assert!(roster.validate_tools(&registry).is_ok());
    }

    #[test]
    fn test_tool_definitions() {
        let roster = Roster::new(front_desk()).unwrap();
        let registry = Registry::new()
            .with_tool(NamedTool("lookup"))
            .with_tool(NamedTool("invoice"));

        let names: Vec<_> = roster
            .tool_definitions(roster.entry(), &registry)
            .into_iter()
            .map(|definition| definition.name)
            .collect();
        assert_eq!(names, ["lookup", "transfer_to_billing", "transfer_to_support"]);

        let support = roster.get("Support").unwrap();
        assert!(roster.tool_definitions(support, &registry).is_empty());
    }

    #[test]
    fn test_resolve_handoff() {
        let roster = Roster::new(front_desk()).unwrap();
        let entry = roster.entry();
        assert_eq!(
            roster
                .resolve_handoff(entry, "transfer_to_support")
                .map(AgentDefinition::name),
            Some("Support")
        );
        assert!(roster.resolve_handoff(entry, "transfer_to_nobody").is_none());

        // Billing has no hand-offs of its own.
        let billing = roster.get("Billing").unwrap();
        assert!(roster.resolve_handoff(billing, "transfer_to_support").is_none());
    }
}
