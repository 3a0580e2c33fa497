//! Error types for reservation-engine operations.
//!
//! Slot computation and access checks are total and never fail. Errors only
//! arise at the edges: loading configuration and parsing claim strings.

use thiserror::Error;

use crate::config::ValidationError;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unsupported config version: {0}")]
    UnsupportedVersion(u32),

    #[error("Invalid configuration: {}", format_errors(.0))]
    InvalidConfig(Vec<ValidationError>),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown reservation status: {0}")]
    UnknownStatus(String),

    #[error("Invalid datetime: {0}")]
    InvalidInstant(String),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, EngineError>;
