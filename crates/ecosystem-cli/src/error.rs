//! CLI error types

use ecosystem_types::DescriptorError;
use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Descriptor could not be loaded or failed validation
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// App not declared in the descriptor
    #[error("App not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
