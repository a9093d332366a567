use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DriftError>;

#[derive(Error, Debug)]
pub enum DriftError {
    #[error("repo {repository} doesn't have branches {range}")]
    InvalidRange { repository: String, range: String },
    #[error("git log exited with {status}: {stderr}")]
    ProcessFailure { status: ExitStatus, stderr: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Cannot aggregate an empty commit list")]
    EmptyRecords,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl DriftError {
    /// Errors that only mean "this pair has nothing to report".
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            DriftError::InvalidRange { .. }
                | DriftError::ProcessFailure { .. }
                | DriftError::Parse(_)
                | DriftError::InvalidDate(_)
        )
    }
}
