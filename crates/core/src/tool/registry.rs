use std::collections::HashMap;
use std::sync::Arc;

use super::object::{ToolObject, ToolObjectImpl};
use super::{
    BoxedToolFuture, Error, Tool, ToolCall, ToolDefinition, ToolOutput,
};

/// A lookup table of tools, keyed by tool name.
///
/// The registry is cheap to clone and can be shared by every agent that
/// uses the same toolset.
#[derive(Clone, Default)]
pub struct Registry {
    tools: HashMap<String, Arc<dyn ToolObject>>,
}

impl Registry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool, replacing any tool with the same name.
    pub fn register<T: Tool>(&mut self, tool: T) {
        let name = tool.name().to_owned();
        let replaced = self
            .tools
            .insert(name.clone(), Arc::new(ToolObjectImpl(tool)));
        if replaced.is_some() {
            warn!("tool `{name}` was registered twice, keeping the last one");
        }
    }

    /// Registers a tool and returns the registry.
    #[inline]
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        self.register(tool);
        self
    }

    /// Keeps only the tools whose name satisfies `keep`.
    pub fn retain<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.tools.retain(|name, _| keep(name));
    }

    /// Returns whether a tool is registered under `name`.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Returns the number of registered tools.
    #[inline]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns whether the registry has no tools.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Returns the registered tool names in alphabetical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the definition of a single tool.
    pub fn definition(&self, name: &str) -> Option<ToolDefinition> {
        self.tools.get(name).map(|tool| make_definition(tool.as_ref()))
    }

    /// Returns the definitions of all tools, sorted by name.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut definitions: Vec<_> = self
            .tools
            .values()
            .map(|tool| make_definition(tool.as_ref()))
            .collect();
        definitions.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        definitions
    }

    /// Calls a tool and waits for its output.
    ///
    /// Unknown tools produce a `NotFound` error, and arguments that don't
    /// match the tool's input type produce an `InvalidInput` error.
    pub async fn call(&self, call: ToolCall) -> ToolOutput {
        let ToolCall {
            id,
            name,
            arguments,
        } = call;
        let result = self.dispatch(&name, arguments).await;
        ToolOutput { id, result }
    }

    /// Dispatches a batch of tool calls.
    ///
    /// For every request, `spawner` receives the request id and a future
    /// resolving to the tool result. The caller decides how and where the
    /// futures run.
    pub fn handle_requests<S>(&self, requests: Vec<ToolCall>, spawner: S)
    where
        S: FnMut(String, BoxedToolFuture),
    {
        let mut spawner = spawner;

        let span = debug_span!("tool registry");
        let _enter = span.enter();

        for req in requests {
            trace!(
                "spawning a tool ({}) with args: {:?}",
                req.id, req.arguments
            );
            spawner(req.id, self.dispatch(&req.name, req.arguments));
        }
    }

    fn dispatch(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> BoxedToolFuture {
        let Some(tool) = self.tools.get(name) else {
            warn!("tool not found: {name}");
            return Box::pin(std::future::ready(Err(Error::unknown_tool(name))));
        };
        tool.execute(arguments)
    }
}

#[inline]
fn make_definition(tool: &dyn ToolObject) -> ToolDefinition {
    ToolDefinition {
        name: tool.name().to_owned(),
        description: tool.description().to_owned(),
        parameters: tool.parameter_schema().clone(),
    }
}
