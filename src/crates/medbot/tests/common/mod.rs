//! In-memory stand-ins for the generation backend and network-bound tools

#![allow(dead_code)]

use async_trait::async_trait;
use llm::{GenerationClient, GenerationRequest, LlmError, TextGenerator};
use medbot::{ConversationHistory, Orchestrator, ResponseCache};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tooling::tools::{SymptomAdviceTool, DRUG_INFO, INTERNET_SEARCH};
use tooling::{ToolExecutor, ToolFailure, ToolRegistry, ToolResult};

// ============================================================================
// Generation
// ============================================================================

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Timeout,
    Panic,
}

pub struct FakeGenerator {
    reply: Reply,
    pub requests: Mutex<Vec<GenerationRequest>>,
}

impl FakeGenerator {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_prompt(&self) -> String {
        self.requests
            .lock()
            .last()
            .map(|r| r.prompt.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, request: &GenerationRequest) -> llm::Result<String> {
        self.requests.lock().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Timeout => Err(LlmError::Timeout("fake".into())),
            Reply::Panic => panic!("generator exploded"),
        }
    }

    fn backend_name(&self) -> &str {
        "fake"
    }
}

// ============================================================================
// Tools
// ============================================================================

/// Every tool invocation in order: (tool name, arguments)
pub type CallLog = Arc<Mutex<Vec<(String, Value)>>>;

/// Records invocations, then delegates or returns a canned result
pub struct LoggedTool {
    name: &'static str,
    inner: Option<Arc<dyn ToolExecutor>>,
    canned: ToolResult,
    log: CallLog,
}

#[async_trait]
impl ToolExecutor for LoggedTool {
    fn name(&self) -> &str {
        self.name
    }

    async fn execute(&self, args: Value) -> ToolResult {
        self.log.lock().push((self.name.to_string(), args.clone()));
        match &self.inner {
            Some(inner) => inner.execute(args).await,
            None => self.canned.clone(),
        }
    }
}

pub fn search_hit(summary: &str) -> ToolResult {
    ToolResult::success(json!({ "query": "q", "summary": summary }))
}

pub fn drug_not_found() -> ToolResult {
    ToolResult::failure(ToolFailure::not_found("Drug 'aspirin' not found in OpenFDA database."))
}

// ============================================================================
// Harness
// ============================================================================

pub struct Harness {
    pub orchestrator: Orchestrator,
    pub generator: Arc<FakeGenerator>,
    pub log: CallLog,
}

impl Harness {
    pub fn tools_called(&self) -> Vec<String> {
        self.log.lock().iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn args_of(&self, tool: &str) -> Vec<Value> {
        self.log
            .lock()
            .iter()
            .filter(|(name, _)| name == tool)
            .map(|(_, args)| args.clone())
            .collect()
    }
}

/// Real symptom knowledge base, canned search and drug tools, fake generator
pub fn harness(reply: Reply, search: ToolResult, drug: ToolResult) -> Harness {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let symptom: Arc<dyn ToolExecutor> = Arc::new(SymptomAdviceTool);

    let registry = ToolRegistry::new()
        .with_tool(Arc::new(LoggedTool {
            name: tooling::tools::SYMPTOM_ADVICE,
            inner: Some(symptom),
            canned: search_hit(""),
            log: log.clone(),
        }))
        .with_tool(Arc::new(LoggedTool {
            name: INTERNET_SEARCH,
            inner: None,
            canned: search,
            log: log.clone(),
        }))
        .with_tool(Arc::new(LoggedTool {
            name: DRUG_INFO,
            inner: None,
            canned: drug,
            log: log.clone(),
        }));

    let generator = FakeGenerator::new(reply);
    let client = GenerationClient::new(generator.clone(), 0.7, 4000);
    let orchestrator = Orchestrator::new(
        Arc::new(registry),
        client,
        Arc::new(ResponseCache::new()),
        Arc::new(ConversationHistory::new(10)),
    );

    Harness {
        orchestrator,
        generator,
        log,
    }
}

pub fn text_harness(text: &str) -> Harness {
    harness(
        Reply::Text(text.to_string()),
        search_hit("**WHO**\nSource: https://who.int/news\nSummary: outbreak update..."),
        drug_not_found(),
    )
}
