// src/cli/mod.rs
// CLI module for smartauditor commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::llm::Provider;

pub mod check;
pub mod serve;

pub use check::run_check;
pub use serve::run_server;

#[derive(Parser)]
#[command(name = "smartauditor")]
#[command(about = "AI-assisted smart contract auditing")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Audit a smart contract file
    Check {
        /// Path to the contract source file
        #[arg(index = 1)]
        file: PathBuf,

        /// API key (default: provider env var, else prompt)
        #[arg(long)]
        api_key: Option<String>,

        /// LLM provider: openai or groq (default: AUDITOR_PROVIDER or openai)
        #[arg(long)]
        provider: Option<Provider>,

        /// Model override
        #[arg(long)]
        model: Option<String>,

        /// Print the result as JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP API server
    Serve {
        /// Address to bind (default: AUDITOR_HOST or 0.0.0.0)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default: AUDITOR_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
    },
}
