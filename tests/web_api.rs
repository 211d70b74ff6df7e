// tests/web_api.rs
// HTTP API driven through the router with a scripted LLM client

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use common::{Reply, ScriptedClient};
use smartauditor::audit::Auditor;
use smartauditor::web::{AppState, create_router};

fn app_with(client: Arc<ScriptedClient>) -> axum::Router {
    let auditor = Arc::new(Auditor::new(client));
    create_router(AppState::new(Some(auditor)))
}

async fn post_analysis(app: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/contract-analysis")
                .header("content-type", "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn contract_body(contract: &str) -> String {
    json!({ "contract": contract }).to_string()
}

#[tokio::test]
async fn test_health() {
    let app = create_router(AppState::default());
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_analysis_returns_normalized_results() {
    let client = Arc::new(ScriptedClient::tool_call(&json!({
        "auditReport": "Simple storage contract.",
        "metricScores": [
            {"metric": "Documentation", "score": 4, "explanation": "Sparse comments"},
            {"metric": "Security", "score": 9, "explanation": "No external calls"}
        ],
        "suggestionForImprovement": [
            {"category": "Documentation", "suggestion": "Add NatSpec", "priority": "Low"}
        ]
    })));
    let app = app_with(client.clone());

    let (status, body) = post_analysis(app, contract_body("contract Storage { uint x; }")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(client.call_count(), 1);

    let results = &body["results"];
    assert_eq!(results["auditReport"], "Simple storage contract.");

    let metrics = results["metricScores"].as_array().unwrap();
    assert_eq!(metrics.len(), 6);
    assert_eq!(metrics[0], json!({"metric": "Security", "score": 9, "explanation": "No external calls"}));
    assert_eq!(metrics[1], json!({"metric": "Performance", "score": 0, "explanation": "No explanation provided"}));
    assert_eq!(metrics[4]["metric"], "Documentation");
    assert_eq!(metrics[4]["score"], 4);

    assert_eq!(
        results["suggestions"],
        json!([{"category": "Documentation", "suggestion": "Add NatSpec", "priority": "Low"}])
    );
}

#[tokio::test]
async fn test_no_tool_call_is_server_error() {
    let client = Arc::new(ScriptedClient::new(Reply::Text("I cannot help with that".into())));
    let (status, body) = post_analysis(app_with(client), contract_body("contract A {}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "MALFORMED_RESPONSE");
    assert!(body["error"].as_str().unwrap().contains("tool call"));
    assert!(body.get("results").is_none());
}

#[tokio::test]
async fn test_provider_failure_is_server_error() {
    let client = Arc::new(ScriptedClient::new(Reply::Fail("API error 401: invalid key".into())));
    let (status, body) = post_analysis(app_with(client), contract_body("contract A {}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "TRANSPORT_ERROR");
    assert!(body["error"].as_str().unwrap().contains("401"));
}

#[tokio::test]
async fn test_unparseable_arguments_are_server_error() {
    let client = Arc::new(ScriptedClient::new(Reply::ToolCall("{\"auditReport\": ".into())));
    let (status, body) = post_analysis(app_with(client), contract_body("contract A {}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "PARSE_ERROR");
}

#[tokio::test]
async fn test_missing_api_key() {
    let app = create_router(AppState::new(None));
    let (status, body) = post_analysis(app, contract_body("contract A {}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "API key is not configured");
    assert_eq!(body["code"], "MISSING_API_KEY");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let client = Arc::new(ScriptedClient::tool_call(&json!({})));
    let (status, body) = post_analysis(app_with(client.clone()), "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_missing_contract_field_is_bad_request() {
    let client = Arc::new(ScriptedClient::tool_call(&json!({})));
    let (status, _) = post_analysis(app_with(client), json!({"code": "x"}).to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_contract_is_forwarded() {
    let client = Arc::new(ScriptedClient::tool_call(&json!({"auditReport": "Nothing to audit."})));
    let (status, body) = post_analysis(app_with(client.clone()), contract_body("")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(client.call_count(), 1);
    assert_eq!(body["results"]["auditReport"], "Nothing to audit.");
    assert_eq!(body["results"]["metricScores"].as_array().unwrap().len(), 6);
}
