// src/main.rs
// smartauditor - audit smart contracts from the terminal or over HTTP

use anyhow::Result;
use clap::Parser;
use smartauditor::cli::{Cli, Commands, run_check, run_server};
use smartauditor::config::{AuditorConfig, DEFAULT_SERVE_LOG_LEVEL};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    init_logging(&cli.command)?;

    // Loaded after the subscriber so config parse warnings are visible
    match cli.command {
        Commands::Check {
            file,
            api_key,
            provider,
            model,
            json,
        } => {
            let config = AuditorConfig::from_env_for(provider);
            run_check(config, file, api_key, model, json).await
        }
        Commands::Serve { host, port } => run_server(AuditorConfig::from_env(), host, port).await,
    }
}

fn init_logging(command: &Commands) -> Result<()> {
    let default_level = match command {
        Commands::Serve { .. } => {
            std::env::var("AUDITOR_LOG_LEVEL").unwrap_or_else(|_| DEFAULT_SERVE_LOG_LEVEL.to_string())
        }
        // stdout carries the report
        Commands::Check { .. } => "warn".to_string(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr; stdout is reserved for command output
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
