//! Error types for the antifraud-stream crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetectorError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("No payment records in {path}")]
    EmptyInput { path: String },

    #[error("Expected {expected} output sinks (one per feature), got {found}")]
    OutputMismatch { expected: usize, found: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DetectorError>;
