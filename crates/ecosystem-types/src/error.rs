//! Descriptor error types

use crate::{Format, ValidationReport};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised before a descriptor's content can be validated
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported descriptor format: {} (expected .json, .yaml, .yml or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("{format} parse error: {message}")]
    Parse { format: Format, message: String },

    #[error("{format} serialization error: {message}")]
    Serialize { format: Format, message: String },
}

impl LoadError {
    pub(crate) fn parse(format: Format, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            format,
            message: err.to_string(),
        }
    }

    pub(crate) fn serialize(format: Format, err: impl std::fmt::Display) -> Self {
        Self::Serialize {
            format,
            message: err.to_string(),
        }
    }
}

/// Descriptor errors
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Validation failed: {0}")]
    Validation(ValidationReport),
}

impl DescriptorError {
    /// The validation report, if this is a validation failure
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            DescriptorError::Validation(report) => Some(report),
            DescriptorError::Load(_) => None,
        }
    }
}

/// Result type for descriptor operations
pub type Result<T> = std::result::Result<T, DescriptorError>;
