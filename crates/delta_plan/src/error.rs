#![forbid(unsafe_code)]

use std::path::PathBuf;

use ftui_delta::{DeltaConfigError, DeltaError, UnknownPolicy};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid number `{value}` at position {position} of --{flag}")]
    InvalidNumber {
        flag: &'static str,
        position: usize,
        value: String,
    },

    #[error("missing input: pass --current and --target, or --input FILE")]
    MissingInput,

    #[error("failed to read {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid input file {path}: {source}")]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config error: {0}")]
    Config(#[from] DeltaConfigError),

    #[error(transparent)]
    Policy(#[from] UnknownPolicy),

    #[error("plan failed: {0}")]
    Plan(#[from] DeltaError),

    #[error("output error: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    ///
    /// `2` for bad invocations and inputs, `3` when no plan exists for valid
    /// inputs, `1` for everything else.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidNumber { .. }
            | Self::MissingInput
            | Self::ReadInput { .. }
            | Self::ParseInput { .. }
            | Self::Config(_)
            | Self::Policy(_) => 2,
            Self::Plan(_) => 3,
            Self::Output(_) | Self::Json(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
