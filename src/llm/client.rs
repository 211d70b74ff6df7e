// src/llm/client.rs
// OpenAI-compatible chat completions client (non-streaming)

use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, instrument, warn, Span};
use uuid::Uuid;

use super::http_client::LlmHttpClient;
use super::openai_compat::{parse_chat_response, ChatRequest};
use super::provider::{LlmClient, Provider};
use super::{ChatResult, Message, Tool};
use crate::config::AuditorConfig;
use crate::error::{AuditError, Result};

/// Chat completions client for any OpenAI-compatible endpoint
pub struct ChatCompletionsClient {
    provider: Provider,
    api_key: String,
    model: String,
    url: String,
    http: LlmHttpClient,
}

impl ChatCompletionsClient {
    /// Create a client from loaded configuration with an explicit key
    pub fn from_config(config: &AuditorConfig, api_key: String) -> Self {
        Self {
            provider: config.provider,
            api_key,
            model: config.model.clone(),
            url: config.chat_completions_url(),
            http: config.http_client(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl LlmClient for ChatCompletionsClient {
    #[instrument(skip(self, messages, tools, tool_choice), fields(request_id, provider = %self.provider, model = %self.model))]
    async fn chat(
        &self,
        messages: Vec<Message>,
        tools: Option<Vec<Tool>>,
        tool_choice: Option<Value>,
    ) -> Result<ChatResult> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();
        let label = self.provider.label();

        Span::current().record("request_id", request_id.as_str());

        info!(
            request_id = %request_id,
            message_count = messages.len(),
            tool_count = tools.as_ref().map(|t| t.len()).unwrap_or(0),
            model = %self.model,
            "Starting {} chat request", label
        );

        let request = ChatRequest::new(&self.model, messages)
            .with_tools(tools)
            .with_tool_choice(tool_choice);

        let body = serde_json::to_string(&request)
            .map_err(|e| AuditError::Transport(format!("failed to encode request: {}", e)))?;
        debug!(request_id = %request_id, body_len = body.len(), "{} request encoded", label);

        let response_body = self
            .http
            .post_json(&request_id, &self.url, &self.api_key, body)
            .await?;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let result = parse_chat_response(&response_body, &request_id, duration_ms)?;

        let usage = result.usage.clone().unwrap_or_default();
        info!(
            request_id = %request_id,
            duration_ms = duration_ms,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            finish_reason = result.finish_reason.as_deref().unwrap_or("unknown"),
            tool = result.tool_call.as_ref().map(|c| c.function.name.as_str()).unwrap_or("none"),
            "{} chat complete", label
        );

        if let Some(call) = &result.tool_call {
            debug!(
                request_id = %request_id,
                call_id = %call.id,
                args_len = call.function.arguments.len(),
                "Tool call arguments received"
            );
        }
        if result.extra_tool_calls > 0 {
            warn!(
                request_id = %request_id,
                extra = result.extra_tool_calls,
                "Model made more than one tool call; only the first is used"
            );
        }
        if result.finish_reason.as_deref() == Some("length") {
            warn!(request_id = %request_id, "Response hit the token limit; tool arguments may be truncated");
        }

        Ok(result)
    }

    fn provider_type(&self) -> Provider {
        self.provider
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}
