use thiserror::Error;

/// Failures of the JSON recovery engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("No JSON object found")]
    NoJsonFound,

    #[error("Could not repair JSON: {0}")]
    JsonRepairFailed(String),
}

/// Single failure signal surfaced by the translation pipeline
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("Text cannot be empty")]
    EmptyInput,

    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    #[error("generation backend failed: {0}")]
    Generation(#[source] anyhow::Error),
}
