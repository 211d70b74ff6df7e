// src/error.rs
// Error types for contract auditing

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the smartauditor library
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("API key is not configured")]
    MissingApiKey,

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("path is a directory, please provide a file: {}", .0.display())]
    NotAFile(PathBuf),

    /// The model answered without invoking the audit tool
    #[error("malformed response: expected a tool call but received none")]
    NoToolCallReturned,

    #[error("failed to parse tool call arguments: {0}")]
    Parse(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Result using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

impl AuditError {
    /// Stable machine-readable code, used at the HTTP boundary
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingApiKey => "MISSING_API_KEY",
            Self::FileNotFound(_) => "FILE_NOT_FOUND",
            Self::NotAFile(_) => "NOT_A_FILE",
            Self::NoToolCallReturned => "MALFORMED_RESPONSE",
            Self::Parse(_) => "PARSE_ERROR",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<reqwest::Error> for AuditError {
    fn from(err: reqwest::Error) -> Self {
        AuditError::Transport(err.to_string())
    }
}
