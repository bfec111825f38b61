//! Error types for greetflow clients and workers.

use std::time::Duration;
use thiserror::Error;
use tonic::Code;

use crate::{EncodingError, FailureInfo};

/// Transport-layer errors for gRPC communication with the workflow service.
///
/// These preserve the original gRPC status codes so callers can decide
/// whether a failed call is worth retrying.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to establish connection to the workflow service
    #[error("Connection failed to {endpoint}: {source}")]
    ConnectionFailed {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },

    /// Invalid endpoint URL provided
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// gRPC status error from server
    #[error("gRPC error [{code}]: {message}")]
    GrpcStatus {
        code: Code,
        message: String,
        details: Vec<u8>,
    },

    /// Request timed out
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),
}

impl From<tonic::Status> for TransportError {
    fn from(status: tonic::Status) -> Self {
        TransportError::GrpcStatus {
            code: status.code(),
            message: status.message().to_string(),
            details: status.details().to_vec(),
        }
    }
}

impl From<tonic::transport::Error> for TransportError {
    fn from(error: tonic::transport::Error) -> Self {
        TransportError::ConnectionFailed {
            endpoint: "unknown".to_string(),
            source: error,
        }
    }
}

impl TransportError {
    /// Create a connection failed error with a specific endpoint
    pub fn connection_failed(endpoint: impl Into<String>, source: tonic::transport::Error) -> Self {
        TransportError::ConnectionFailed {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Build a gRPC status error without a round trip through `tonic::Status`.
    pub fn status(code: Code, message: impl Into<String>) -> Self {
        TransportError::GrpcStatus {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Check if this error is retryable (transient failure)
    pub fn is_retryable(&self) -> bool {
        match self {
            TransportError::GrpcStatus { code, .. } => matches!(
                code,
                Code::Unavailable
                    | Code::ResourceExhausted
                    | Code::Aborted
                    | Code::DeadlineExceeded
            ),
            TransportError::Timeout(_) => true,
            TransportError::ConnectionFailed { .. } => true,
            TransportError::InvalidEndpoint(_) => false,
        }
    }

    /// Get the gRPC status code if this is a gRPC error
    pub fn grpc_code(&self) -> Option<Code> {
        match self {
            TransportError::GrpcStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// Main greetflow error type for clients and workers
#[derive(Debug, Error)]
pub enum GreetflowError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The workflow closed with a failure
    #[error("Workflow execution failed: {0}")]
    WorkflowExecutionFailed(FailureInfo),

    #[error("Workflow execution was cancelled")]
    WorkflowExecutionCancelled,

    #[error("Workflow execution timed out")]
    WorkflowExecutionTimedOut,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GreetflowError {
    pub fn is_retryable(&self) -> bool {
        match self {
            GreetflowError::Transport(e) => e.is_retryable(),
            _ => false,
        }
    }
}

pub type GreetflowResult<T> = Result<T, GreetflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_classify_retryability() {
        assert!(TransportError::status(Code::Unavailable, "down").is_retryable());
        assert!(!TransportError::status(Code::InvalidArgument, "bad").is_retryable());
        assert!(!TransportError::InvalidEndpoint("::".into()).is_retryable());
    }

    #[test]
    fn tonic_status_keeps_code_and_message() {
        let err: TransportError = tonic::Status::not_found("no such run").into();
        assert_eq!(err.grpc_code(), Some(Code::NotFound));
        assert!(err.to_string().contains("no such run"));
    }

    #[test]
    fn workflow_failure_is_not_retryable() {
        let err = GreetflowError::WorkflowExecutionFailed(FailureInfo::new(
            "boom",
            "ActivityFailed",
            true,
        ));
        assert!(!err.is_retryable());
        assert_eq!(
            err.to_string(),
            "Workflow execution failed: ActivityFailed: boom"
        );
    }
}
