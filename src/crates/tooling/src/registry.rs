//! Tool registry
//!
//! Maps tool names to executors and runs them in-process. Every invocation
//! yields a [`ToolResult`]; unknown names become an `UnknownTool` failure.

use crate::config::ToolsConfig;
use crate::logging::timed;
use crate::runtime::{Result, RuntimeError, ToolFailure, ToolResult};
use crate::tools::{
    self, CurrentTimeTool, DrugInfoTool, DrugInteractionsTool, InternetSearchTool, OpenFdaClient,
    SearchClient, SymptomAdviceTool,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A named capability the orchestrator can invoke
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Registry key
    fn name(&self) -> &str;

    /// Run the tool; failures are reported in the result, never raised
    async fn execute(&self, args: Value) -> ToolResult;
}

/// Name-keyed set of tool executors
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ToolExecutor>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list_tools())
            .finish()
    }
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry with the five standard health tools
    ///
    /// Fails only if the HTTP clients cannot be constructed.
    pub fn standard(config: &ToolsConfig) -> Result<Self> {
        let search = Arc::new(SearchClient::new(config)?);
        let drugs = OpenFdaClient::new(config)?;

        let mut registry = Self::new();

        macro_rules! register_tool {
            ($tool:expr) => {
                registry.register(Arc::new($tool));
            };
        }

        register_tool!(SymptomAdviceTool);
        register_tool!(DrugInfoTool::new(drugs));
        register_tool!(InternetSearchTool::new(Arc::clone(&search)));
        register_tool!(DrugInteractionsTool::new(search));
        register_tool!(CurrentTimeTool);

        registry.validate(tools::STANDARD_TOOLS)?;

        info!(
            tools = registry.len(),
            searx = %config.searx_host,
            openfda = %config.openfda_base,
            "Initialized tool registry"
        );
        Ok(registry)
    }

    /// Register a tool, replacing any previous tool with the same name
    pub fn register(&mut self, tool: Arc<dyn ToolExecutor>) -> &mut Self {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_some() {
            warn!(tool = %name, "Replaced existing tool registration");
        }
        self
    }

    /// Builder-style registration
    pub fn with_tool(mut self, tool: Arc<dyn ToolExecutor>) -> Self {
        self.register(tool);
        self
    }

    /// Check that every required tool is registered
    pub fn validate(&self, required: &[&str]) -> Result<()> {
        match required.iter().find(|name| !self.contains(name)) {
            Some(missing) => Err(RuntimeError::ToolNotFound((*missing).to_string())),
            None => Ok(()),
        }
    }

    /// Invoke a tool by name
    pub async fn invoke(&self, name: &str, args: Value) -> ToolResult {
        let Some(tool) = self.tools.get(name) else {
            warn!(tool = %name, "Invocation of unregistered tool");
            return ToolResult::failure(ToolFailure::unknown_tool(name));
        };

        debug!(tool = %name, args = %args, "Executing tool");
        let result = timed(name, tool.execute(args)).await;

        match &result {
            ToolResult::Success { .. } => debug!(tool = %name, "Tool succeeded"),
            ToolResult::Error(failure) => debug!(
                tool = %name,
                kind = ?failure.kind,
                message = %failure.message,
                search_fallback = failure.use_internet_search(),
                "Tool reported failure"
            ),
        }
        result
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Registered tool names, sorted
    pub fn list_tools(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
