// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, warn};

use crate::llm::{LlmHttpClient, Provider};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Log level for `serve` when neither RUST_LOG nor AUDITOR_LOG_LEVEL is set.
/// Read in `main` before logging is set up.
pub const DEFAULT_SERVE_LOG_LEVEL: &str = "info";

/// Runtime configuration for the auditor.
///
/// Built once at startup and passed explicitly to whatever needs it.
#[derive(Debug, Clone)]
pub struct AuditorConfig {
    // ── Provider
    pub provider: Provider,
    pub base_url: String,
    pub model: String,
    /// Key read from the provider's env var (OPENAI_API_KEY / GROQ_API_KEY)
    pub api_key: Option<String>,

    // ── Server
    pub host: String,
    pub port: u16,

    // ── Transport (seconds)
    pub request_timeout: u64,
    pub connect_timeout: u64,
    pub max_retries: u32,
}

/// Parse a typed value, tolerating trailing comments and whitespace.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => {
                    debug!(key = key, value = clean_val, "Config value from environment");
                    parsed
                }
                Err(_) => {
                    warn!(key = key, value = %val, "Config value failed to parse, using default");
                    default
                }
            }
        }
        None => default,
    }
}

/// Read a string value, filtering empty values
fn read_key<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AuditorConfig {
    /// Load from process environment (call `dotenvy::dotenv()` first to pick up `.env`)
    pub fn from_env() -> Self {
        Self::from_env_for(None)
    }

    /// Load from process environment, forcing a provider
    pub fn from_env_for(provider: Option<Provider>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), provider)
    }

    /// Load from an arbitrary key lookup.
    ///
    /// Provider-dependent defaults (base URL, model, API key variable) follow
    /// `provider` when given, else `AUDITOR_PROVIDER`, else OpenAI.
    pub fn from_lookup<F>(lookup: F, provider: Option<Provider>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider = provider.unwrap_or_else(|| parse_or(&lookup, "AUDITOR_PROVIDER", Provider::OpenAi));

        let base_url = read_key(&lookup, "AUDITOR_BASE_URL")
            .unwrap_or_else(|| provider.default_base_url().to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            provider,
            base_url,
            model: read_key(&lookup, "AUDITOR_MODEL")
                .unwrap_or_else(|| provider.default_model().to_string()),
            api_key: read_key(&lookup, provider.api_key_env_var()),
            host: read_key(&lookup, "AUDITOR_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or(&lookup, "AUDITOR_PORT", DEFAULT_PORT),
            request_timeout: parse_or(&lookup, "AUDITOR_REQUEST_TIMEOUT", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: parse_or(&lookup, "AUDITOR_CONNECT_TIMEOUT", DEFAULT_CONNECT_TIMEOUT_SECS),
            max_retries: parse_or(&lookup, "AUDITOR_MAX_RETRIES", 0),
        }
    }

    /// Full URL of the chat completions endpoint
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// HTTP client configured with this config's timeouts and retry count
    pub fn http_client(&self) -> LlmHttpClient {
        LlmHttpClient::new(
            Duration::from_secs(self.request_timeout),
            Duration::from_secs(self.connect_timeout),
        )
        .with_max_retries(self.max_retries)
    }

    /// Check the configuration for problems before serving
    pub fn validate(&self) -> ConfigValidation {
        let mut validation = ConfigValidation::new();

        if self.api_key.is_none() {
            validation.add_warning(format!(
                "{} is not set; analysis requests will fail",
                self.provider.api_key_env_var()
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            validation.add_error(format!("AUDITOR_BASE_URL '{}' is not an http(s) URL", self.base_url));
        }
        if self.model.trim().is_empty() {
            validation.add_error("AUDITOR_MODEL is empty");
        }
        if self.request_timeout == 0 {
            validation.add_error("AUDITOR_REQUEST_TIMEOUT must be greater than 0");
        }
        if self.max_retries > 5 {
            validation.add_warning(format!("AUDITOR_MAX_RETRIES={} is unusually high", self.max_retries));
        }

        validation
    }
}

/// Configuration validation result
#[derive(Debug)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Default for ConfigValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warning in &self.warnings {
                lines.push(format!("  - {}", warning));
            }
        }

        lines.join("\n")
    }
}
