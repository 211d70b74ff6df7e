// src/llm/mod.rs
// Chat completion clients (OpenAI, Groq)

mod client;
mod http_client;
mod openai_compat;
mod provider;
mod types;

pub use client::ChatCompletionsClient;
pub use http_client::LlmHttpClient;
pub use openai_compat::{force_function, parse_chat_response, ChatRequest};
pub use provider::{LlmClient, Provider};
pub use types::{ChatResult, FunctionCall, FunctionDef, Message, Tool, ToolCall, Usage};
