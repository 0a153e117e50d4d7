//! Declarative agent definitions.
//!
//! An agent here is pure configuration: instructions, the names of the
//! tools it may call, the agents it may hand the conversation off to, and a
//! few knobs that tell the orchestration layer how to treat tool calls.
//! Nothing in this module talks to a model.

mod roster;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::tool::ToolDefinition;
pub use roster::{Roster, RosterError};

/// Controls whether the model must call a tool.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    /// The model decides.
    #[default]
    Auto,
    /// The model must call at least one tool.
    Required,
    /// The model must not call tools.
    None,
}

/// What happens after the agent's tools have run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tools")]
pub enum ToolUseBehavior {
    /// Tool outputs are sent back to the model, which produces the reply.
    #[default]
    RunLlmAgain,
    /// The output of the first tool call is the final reply.
    StopOnFirstTool,
    /// The output of any of the listed tools is the final reply.
    StopAtTools(Vec<String>),
}

impl ToolUseBehavior {
    /// Returns whether a call to `tool_name` ends the agent's turn with the
    /// tool output as the final reply.
    pub fn stops_after(&self, tool_name: &str) -> bool {
        match self {
            ToolUseBehavior::RunLlmAgain => false,
            ToolUseBehavior::StopOnFirstTool => true,
            ToolUseBehavior::StopAtTools(names) => {
                names.iter().any(|name| name == tool_name)
            }
        }
    }
}

/// An agent definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    name: String,
    instructions: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    #[serde(default)]
    tools: Vec<String>,
    #[serde(default)]
    handoffs: Vec<String>,
    #[serde(default)]
    tool_choice: ToolChoice,
    #[serde(default)]
    tool_use_behavior: ToolUseBehavior,
}

impl AgentDefinition {
    /// Creates an agent with a name and instructions, no tools and no
    /// hand-offs.
    pub fn new<N: Into<String>, I: Into<String>>(
        name: N,
        instructions: I,
    ) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            model: None,
            tools: vec![],
            handoffs: vec![],
            tool_choice: ToolChoice::default(),
            tool_use_behavior: ToolUseBehavior::default(),
        }
    }

    /// Sets the model (the deployment name on Azure).
    #[inline]
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Attaches a tool by name.
    #[inline]
    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tools.push(tool.into());
        self
    }

    /// Adds an agent that this agent may hand the conversation off to.
    #[inline]
    pub fn with_handoff<S: Into<String>>(mut self, agent: S) -> Self {
        self.handoffs.push(agent.into());
        self
    }

    /// Sets the tool choice.
    #[inline]
    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = tool_choice;
        self
    }

    /// Sets the tool use behavior.
    #[inline]
    pub fn with_tool_use_behavior(mut self, behavior: ToolUseBehavior) -> Self {
        self.tool_use_behavior = behavior;
        self
    }

    /// Returns the agent name, unique within a roster.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the system instructions.
    #[inline]
    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    /// Returns the model, if one is pinned.
    #[inline]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    /// Returns the names of the attached tools.
    #[inline]
    pub fn tools(&self) -> &[String] {
        &self.tools
    }

    /// Returns the names of the hand-off targets.
    #[inline]
    pub fn handoffs(&self) -> &[String] {
        &self.handoffs
    }

    /// Returns the tool choice.
    #[inline]
    pub fn tool_choice(&self) -> ToolChoice {
        self.tool_choice
    }

    /// Returns the tool use behavior.
    #[inline]
    pub fn tool_use_behavior(&self) -> &ToolUseBehavior {
        &self.tool_use_behavior
    }

    /// Name of the tool that hands a conversation off to this agent, e.g.
    /// `transfer_to_rental_refund_agent`.
    pub fn handoff_tool_name(&self) -> String {
        format!("transfer_to_{}", snake_case(&self.name))
    }

    /// The tool definition exposing a hand-off to this agent.
    pub fn handoff_definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.handoff_tool_name(),
            description: format!(
                "Handoff to the {} agent to handle the request.",
                self.name
            ),
            parameters: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false,
            }),
        }
    }
}

/// Lowercases a name and joins its alphanumeric runs with underscores.
fn snake_case(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut pending_sep = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !result.is_empty() {
                result.push('_');
            }
            pending_sep = false;
            result.extend(ch.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    result
}
