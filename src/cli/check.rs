// src/cli/check.rs
// `check` command: audit one contract file and print the report

use anyhow::Result;
use dialoguer::Password;
use std::io::{ErrorKind, IsTerminal};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::audit::Auditor;
use crate::config::AuditorConfig;
use crate::error::AuditError;
use crate::llm::ChatCompletionsClient;
use crate::report::render_report;

/// Resolve `file` against the working directory and make sure it is a regular file.
pub fn resolve_contract_path(file: &Path) -> crate::error::Result<PathBuf> {
    let path = if file.is_absolute() {
        file.to_path_buf()
    } else {
        std::env::current_dir()?.join(file)
    };

    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_dir() => Err(AuditError::NotAFile(path)),
        Ok(_) => Ok(path),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(AuditError::FileNotFound(path)),
        Err(e) => Err(e.into()),
    }
}

/// Pick the API key: flag, then environment, then a hidden prompt if interactive
pub fn resolve_api_key(
    flag: Option<String>,
    config: &AuditorConfig,
    interactive: bool,
) -> Result<String> {
    let known = flag
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .or_else(|| config.api_key.clone());

    if let Some(key) = known {
        return Ok(key);
    }

    if !interactive {
        return Err(AuditError::MissingApiKey.into());
    }

    let key = Password::new()
        .with_prompt(format!("Enter your {} API key", config.provider.label()))
        .allow_empty_password(true)
        .interact()?;

    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(AuditError::MissingApiKey.into());
    }
    Ok(key)
}

pub async fn run_check(
    config: AuditorConfig,
    file: PathBuf,
    api_key: Option<String>,
    model: Option<String>,
    json: bool,
) -> Result<()> {
    let display_path = std::env::current_dir()
        .map(|cwd| cwd.join(&file))
        .unwrap_or_else(|_| file.clone());
    eprintln!("checking file at path: {}", display_path.display());

    // Path problems are reported before any prompt or network call
    let path = resolve_contract_path(&file)?;
    let contract = tokio::fs::read_to_string(&path).await?;
    debug!(path = %path.display(), bytes = contract.len(), "Read contract");

    let key = resolve_api_key(api_key, &config, std::io::stdin().is_terminal())?;

    let mut client = ChatCompletionsClient::from_config(&config, key);
    if let Some(model) = model {
        client = client.with_model(model);
    }
    let auditor = Auditor::new(Arc::new(client));

    eprintln!("Starting contract analysis... This may take a minute");
    let result = auditor.analyze(&contract).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_report(&result));
    }

    Ok(())
}
