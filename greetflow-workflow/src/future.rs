//! Workflow futures and errors.

use greetflow_core::{EncodingError, FailureInfo};
use std::future::Future;
use std::pin::Pin;

/// Future returned by a [`CommandSink`](crate::CommandSink) for one command
pub type CommandFuture = Pin<Box<dyn Future<Output = Result<Vec<u8>, WorkflowError>> + Send>>;

/// Workflow error
#[derive(Debug, Clone, thiserror::Error)]
pub enum WorkflowError {
    /// An activity failed terminally (retries, if any, are exhausted)
    #[error("Activity failed: {0}")]
    ActivityFailed(FailureInfo),
    #[error("Workflow cancelled")]
    Cancelled,
    #[error(transparent)]
    Serialization(#[from] EncodingError),
    #[error("Non-deterministic workflow: {0}")]
    NonDeterministic(String),
    #[error("Generic error: {0}")]
    Generic(String),
}

impl WorkflowError {
    pub fn failure_type(&self) -> &'static str {
        match self {
            WorkflowError::ActivityFailed(_) => "ActivityFailed",
            WorkflowError::Cancelled => "Cancelled",
            WorkflowError::Serialization(_) => "Serialization",
            WorkflowError::NonDeterministic(_) => "NonDeterministic",
            WorkflowError::Generic(_) => "Generic",
        }
    }

    /// Failure reported to the service when this error ends a workflow.
    pub fn to_failure(&self) -> FailureInfo {
        FailureInfo::new(self.to_string(), self.failure_type(), true)
    }
}
