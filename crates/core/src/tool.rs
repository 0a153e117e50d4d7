//! Tool call supports.
//!
//! A tool is a named operation with a typed input and a string output. Tools
//! are collected into a [`Registry`], which is the explicit lookup table the
//! orchestration layer dispatches model tool calls through.

mod error;
mod object;
mod registry;

use std::pin::Pin;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub use error::{Error, ErrorKind};
pub use registry::Registry;

/// The result of a tool call.
pub type ToolResult = Result<String, Error>;

/// A type-erased future of a tool call.
pub type BoxedToolFuture = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// A tool that can be called by the model.
///
/// Implementations of this trait should be stateless. Anything the tool
/// needs (a price source, a lookup table) should be an immutable part of
/// the tool set during initialization and cloned into the future when
/// executing.
pub trait Tool: Send + Sync + 'static {
    /// The type of input that the tool accepts.
    type Input: DeserializeOwned;

    /// Returns the name of the tool.
    fn name(&self) -> &str;

    /// Returns the description of the tool.
    fn description(&self) -> &str;

    /// Returns the parameter schema of the tool.
    fn parameter_schema(&self) -> &Value;

    /// Executes the tool with the given input.
    ///
    /// This method must return a future that is fully independent of `self`,
    /// and the future should be cancellation safe.
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static;
}

/// Describes a tool that can be offered to the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool.
    pub name: String,
    /// Description of the tool.
    pub description: String,
    /// Parameters definition of the tool, typically a
    /// [JSON schema](https://json-schema.org/).
    pub parameters: Value,
}

impl ToolDefinition {
    /// Returns the definition in the chat-completions `tools` array shape.
    pub fn to_function_json(&self) -> Value {
        json!({
            "type": "function",
            "function": {
                "name": self.name,
                "description": self.description,
                "parameters": self.parameters,
            }
        })
    }
}

/// A tool call request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// The unique identifier for the tool call request.
    pub id: String,
    /// The name of the tool to call.
    pub name: String,
    /// The arguments to pass to the tool.
    pub arguments: Value,
}

impl ToolCall {
    /// Creates a new tool call request.
    #[inline]
    pub fn new<ID: Into<String>, N: Into<String>>(
        id: ID,
        name: N,
        arguments: Value,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}

/// The outcome of a tool call, tagged with the request id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolOutput {
    /// The unique identifier for the tool call request.
    pub id: String,
    /// The result of the tool call.
    pub result: ToolResult,
}

impl ToolOutput {
    /// Returns the content to hand back to the model.
    ///
    /// Errors are reported as text, so the model can react to them.
    pub fn content(&self) -> String {
        match &self.result {
            Ok(content) => content.clone(),
            Err(err) => format!("Error: {err}"),
        }
    }
}
