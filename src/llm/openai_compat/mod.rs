// src/llm/openai_compat/mod.rs
// Shared OpenAI-compatible request/response handling for OpenAI and Groq

mod request;
mod response;

pub use request::{force_function, ChatRequest};
pub use response::parse_chat_response;
