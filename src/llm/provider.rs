// src/llm/provider.rs
// LLM provider abstraction layer

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::{ChatResult, Message, Tool};
use crate::error::{AuditError, Result};

/// Chat completion providers speaking the OpenAI wire format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    Groq,
}

impl Provider {
    /// Get the environment variable name for this provider's API key
    pub fn api_key_env_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Groq => "GROQ_API_KEY",
        }
    }

    /// Default model for this provider
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Groq => "deepseek-r1-distill-llama-70b",
        }
    }

    /// Base URL of the chat completions API, without trailing slash
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Groq => "https://api.groq.com/openai/v1",
        }
    }

    /// Human-readable name for prompts and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Groq => "Groq",
        }
    }
}

impl FromStr for Provider {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "groq" => Ok(Self::Groq),
            other => Err(AuditError::Config(format!(
                "unknown provider '{}', expected 'openai' or 'groq'",
                other
            ))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenAi => write!(f, "openai"),
            Self::Groq => write!(f, "groq"),
        }
    }
}

/// Trait for LLM clients - all providers must implement this
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a chat completion request.
    ///
    /// `tool_choice` is forwarded verbatim; `None` lets the provider decide.
    async fn chat(
        &self,
        messages: Vec<Message>,
        tools: Option<Vec<Tool>>,
        tool_choice: Option<Value>,
    ) -> Result<ChatResult>;

    /// Get the provider type
    fn provider_type(&self) -> Provider;

    /// Model identifier sent with each request
    fn model_name(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert_eq!(" GROQ ".parse::<Provider>().unwrap(), Provider::Groq);
        let err = "anthropic".parse::<Provider>().unwrap_err();
        assert!(matches!(err, AuditError::Config(_)));
        assert!(err.to_string().contains("anthropic"));
    }

    #[test]
    fn test_provider_display_round_trips() {
        for provider in [Provider::OpenAi, Provider::Groq] {
            assert_eq!(provider.to_string().parse::<Provider>().unwrap(), provider);
        }
    }

    #[test]
    fn test_provider_defaults() {
        assert_eq!(Provider::OpenAi.api_key_env_var(), "OPENAI_API_KEY");
        assert_eq!(Provider::Groq.api_key_env_var(), "GROQ_API_KEY");
        assert_eq!(Provider::OpenAi.default_model(), "gpt-4o-mini");
        assert!(!Provider::Groq.default_base_url().ends_with('/'));
    }
}
