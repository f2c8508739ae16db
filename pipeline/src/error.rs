use thiserror::Error;
use tokio::time::Duration;

use crate::machine::Stage;

/// The orchestration engine refused to start a new execution.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("an execution named '{0}' is already in flight")]
    DuplicateExecution(String),

    #[error("execution rejected: {0}")]
    Rejected(String),
}

/// Failure of one external platform operation.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{operation} rejected by the platform: {message}")]
    Remote { operation: String, message: String },
}

#[derive(Debug, Error)]
pub enum ParameterStoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why an execution ended in the Failed state.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("{stage} failed: {source}")]
    Execution {
        stage: Stage,
        #[source]
        source: PlatformError,
    },

    #[error("{stage} exceeded its {}s budget", .budget.as_secs())]
    Timeout { stage: Stage, budget: Duration },

    #[error("execution deadline exceeded while {stage} was in flight")]
    ExecutionDeadline { stage: Stage },

    #[error("publishing the endpoint identity failed: {source}")]
    Publish {
        #[source]
        source: ParameterStoreError,
    },
}

impl StageError {
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Execution { stage, .. }
            | Self::Timeout { stage, .. }
            | Self::ExecutionDeadline { stage } => Some(*stage),
            Self::Publish { .. } => None,
        }
    }
}
