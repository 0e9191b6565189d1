//! Error types for the analyzer
//!
//! The scoring core never fails: dangling references and empty inputs have
//! defined fallbacks. Everything here originates in the collaborators around
//! it (discovery, parsing, configuration, fact loading, output).

use std::process::ExitCode;

use thiserror::Error;

/// Errors surfaced by the collaborators and the command line
#[derive(Debug, Error)]
pub enum IpiError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse {path}: {message}")]
    ParseFailure { path: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {message}")]
    Config { message: String },

    #[error("invalid fact sheet: {message}")]
    InvalidFacts { message: String },

    #[error("invalid search pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("serialization failed: {message}")]
    Serialization { message: String },
}

impl IpiError {
    /// Numeric exit status for this error
    pub fn exit_status(&self) -> u8 {
        match self {
            Self::FileNotFound { .. } => 2,
            Self::Config { .. } | Self::InvalidFacts { .. } => 3,
            _ => 1,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

impl From<serde_json::Error> for IpiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, IpiError>;
