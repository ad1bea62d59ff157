use std::path::PathBuf;

use canslim_core::{CoreError, ValidationError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid input in {}: {source}", path.display())]
    Input {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("missing required flag --{flag}")]
    MissingFlag { flag: &'static str },

    #[error("config error: {0}")]
    Config(String),

    #[error("result carries {error_count} error(s)")]
    EnvelopeErrors { error_count: usize },

    #[error("strict mode failed: warnings={warning_count}, errors={error_count}")]
    StrictModeViolation {
        warning_count: usize,
        error_count: usize,
    },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<CoreError> for CliError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(error) => Self::Validation(error),
            CoreError::Serialization(error) => Self::Serialization(error),
            CoreError::Config(error) => Self::Config(error.to_string()),
            CoreError::Io(error) => Self::Io(error),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::Input { .. } | Self::MissingFlag { .. } => 2,
            Self::EnvelopeErrors { .. } => 3,
            Self::Serialization(_) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Config(_) | Self::Io(_) => 10,
        }
    }
}
