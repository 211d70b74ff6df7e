// src/cli/serve.rs
// `serve` command: run the HTTP API

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

use crate::audit::Auditor;
use crate::config::AuditorConfig;
use crate::llm::ChatCompletionsClient;
use crate::web::{self, AppState};

/// Build server state from configuration. Without a key the server still
/// runs and analysis requests fail with `MissingApiKey`.
pub fn build_state(config: &AuditorConfig) -> AppState {
    let auditor = config.api_key.clone().map(|key| {
        let client = ChatCompletionsClient::from_config(config, key);
        Arc::new(Auditor::new(Arc::new(client)))
    });
    AppState::new(auditor)
}

pub async fn run_server(mut config: AuditorConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let validation = config.validate();
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    if !validation.is_valid() {
        anyhow::bail!("Invalid configuration:\n{}", validation.report());
    }

    info!(
        provider = %config.provider,
        model = %config.model,
        key_configured = config.api_key.is_some(),
        "Starting contract analysis server"
    );

    let app = web::create_router(build_state(&config));
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
