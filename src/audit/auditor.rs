// src/audit/auditor.rs
// One audit request: prompt, single chat call, normalization

use std::sync::Arc;
use tracing::{info, warn};

use super::normalize::{extract_payload, inspect, normalize};
use super::schema::{audit_tool, audit_tool_choice, build_messages, AUDIT_TOOL_NAME};
use super::types::AuditResult;
use crate::error::Result;
use crate::llm::LlmClient;

/// Runs contract audits against an explicitly supplied LLM client
pub struct Auditor {
    client: Arc<dyn LlmClient>,
}

impl Auditor {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }

    /// Audit one contract. A single attempt; errors are returned, not retried.
    pub async fn analyze(&self, contract: &str) -> Result<AuditResult> {
        info!(
            provider = %self.client.provider_type(),
            model = %self.client.model_name(),
            contract_len = contract.len(),
            "Sending contract for analysis"
        );

        let response = self
            .client
            .chat(
                build_messages(contract),
                Some(vec![audit_tool()]),
                Some(audit_tool_choice()),
            )
            .await?;

        if let Some(call) = &response.tool_call {
            if call.function.name != AUDIT_TOOL_NAME {
                warn!(
                    request_id = %response.request_id,
                    tool = %call.function.name,
                    "Model called an unexpected tool; using its arguments anyway"
                );
            }
        }

        let payload = extract_payload(&response)?;
        for issue in inspect(&payload) {
            warn!(request_id = %response.request_id, "{}", issue);
        }

        let result = normalize(payload);
        info!(
            request_id = %response.request_id,
            suggestions = result.suggestions.len(),
            "Contract analysis complete"
        );
        Ok(result)
    }
}
