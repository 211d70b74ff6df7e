// src/llm/openai_compat/response.rs
// Decodes a chat completion down to the one tool call an audit acts on

use serde::Deserialize;

use crate::error::{AuditError, Result};
use crate::llm::{ChatResult, ToolCall, Usage};

#[derive(Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
    /// Some gateways report failures in-band with a 200
    error: Option<ProviderError>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
    tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Deserialize)]
struct ProviderError {
    #[serde(default)]
    message: String,
}

/// Decode a completion body.
///
/// Only the first choice is read. Of its tool calls the first is kept and
/// the rest are counted in `extra_tool_calls`.
pub fn parse_chat_response(body: &str, request_id: &str, duration_ms: u64) -> Result<ChatResult> {
    let completion: Completion = serde_json::from_str(body)
        .map_err(|e| AuditError::Transport(format!("failed to decode chat response: {}", e)))?;

    if let Some(err) = completion.error {
        return Err(AuditError::Transport(format!("provider error: {}", err.message)));
    }

    let mut result = ChatResult {
        request_id: request_id.to_owned(),
        usage: completion.usage,
        duration_ms,
        ..Default::default()
    };

    if let Some(choice) = completion.choices.into_iter().next() {
        let mut calls = choice.message.tool_calls.unwrap_or_default().into_iter();
        result.tool_call = calls.next();
        result.extra_tool_calls = calls.len();
        result.content = choice.message.content.filter(|c| !c.is_empty());
        result.finish_reason = choice.finish_reason;
    }

    Ok(result)
}
