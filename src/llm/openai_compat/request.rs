// src/llm/openai_compat/request.rs
// OpenAI-compatible chat request builder

use crate::llm::{Message, Tool};
use serde::Serialize;
use serde_json::{json, Value};

/// Chat completion request (OpenAI-compatible format)
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>, // "auto" | "required" | {"type": "function", ...}
}

impl ChatRequest {
    /// Create a new non-streaming chat request with required fields
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: false,
            tools: None,
            tool_choice: None,
        }
    }

    /// Set tools for function calling
    pub fn with_tools(mut self, tools: Option<Vec<Tool>>) -> Self {
        self.tools = tools;
        self
    }

    /// Set the tool choice; ignored when no tools are attached
    pub fn with_tool_choice(mut self, tool_choice: Option<Value>) -> Self {
        if self.tools.is_some() {
            self.tool_choice = tool_choice;
        }
        self
    }
}

/// `tool_choice` value forcing the model to call the named function
pub fn force_function(name: &str) -> Value {
    json!({
        "type": "function",
        "function": { "name": name }
    })
}
