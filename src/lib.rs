// src/lib.rs
// smartauditor - AI-assisted smart contract auditing

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod report;
pub mod web;

pub use error::{AuditError, Result};
