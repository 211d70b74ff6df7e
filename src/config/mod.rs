// src/config/mod.rs
// Configuration loading

pub mod env;

pub use env::{AuditorConfig, ConfigValidation, DEFAULT_SERVE_LOG_LEVEL};
