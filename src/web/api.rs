// src/web/api.rs
// REST API handlers

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info};

use crate::audit::AuditResult;
use crate::error::AuditError;
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub contract: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub results: AuditResult,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// POST /api/contract-analysis
///
/// The contract is forwarded as given, empty or not. Only an undecodable
/// body is a 400; every audit failure is a 500.
pub async fn analyze_contract(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let Json(req) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let Some(auditor) = state.auditor.as_ref() else {
        error!("Contract analysis requested but no API key is configured");
        return Err(AuditError::MissingApiKey.into());
    };

    info!(contract_len = req.contract.len(), "Contract analysis request");

    let results = auditor.analyze(&req.contract).await.map_err(|e| {
        error!(code = e.code(), "Error analyzing contract: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(AnalyzeResponse { results }))
}
