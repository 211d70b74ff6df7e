// tests/common/mod.rs
// Shared helpers: a scripted LLM client standing in for the provider

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use smartauditor::llm::{ChatResult, FunctionCall, LlmClient, Message, Provider, Tool, ToolCall};
use smartauditor::{AuditError, Result};

/// What the scripted client answers with
pub enum Reply {
    /// A tool call carrying these raw arguments
    ToolCall(String),
    /// A plain assistant message, no tool call
    Text(String),
    /// A transport failure
    Fail(String),
}

pub struct ScriptedClient {
    reply: Reply,
    pub calls: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedClient {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn tool_call(arguments: &Value) -> Self {
        Self::new(Reply::ToolCall(arguments.to_string()))
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn chat(
        &self,
        messages: Vec<Message>,
        _tools: Option<Vec<Tool>>,
        _tool_choice: Option<Value>,
    ) -> Result<ChatResult> {
        self.calls.lock().unwrap().push(messages);

        let (content, tool_call) = match &self.reply {
            Reply::ToolCall(args) => (
                None,
                Some(ToolCall {
                    id: "call_test".to_string(),
                    call_type: "function".to_string(),
                    function: FunctionCall {
                        name: "generate_audit_report".to_string(),
                        arguments: args.clone(),
                    },
                }),
            ),
            Reply::Text(text) => (Some(text.clone()), None),
            Reply::Fail(msg) => return Err(AuditError::Transport(msg.clone())),
        };

        Ok(ChatResult {
            request_id: "test-request".to_string(),
            content,
            tool_call,
            duration_ms: 1,
            ..Default::default()
        })
    }

    fn provider_type(&self) -> Provider {
        Provider::OpenAi
    }

    fn model_name(&self) -> String {
        "scripted".to_string()
    }
}
