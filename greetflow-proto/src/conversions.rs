//! Conversions between wire messages and `greetflow-core` types.
//!
//! Durations travel as integer milliseconds and timestamps as unix
//! milliseconds.

use greetflow_core as api;
use greetflow_core::{duration_to_millis, millis_to_duration};

use crate::generated as pb;

impl From<api::WorkflowExecution> for pb::WorkflowExecution {
    fn from(execution: api::WorkflowExecution) -> Self {
        pb::WorkflowExecution {
            workflow_id: execution.workflow_id,
            run_id: execution.run_id,
        }
    }
}

impl From<pb::WorkflowExecution> for api::WorkflowExecution {
    fn from(execution: pb::WorkflowExecution) -> Self {
        api::WorkflowExecution::new(execution.workflow_id, execution.run_id)
    }
}

impl From<api::RetryPolicy> for pb::RetryPolicy {
    fn from(policy: api::RetryPolicy) -> Self {
        pb::RetryPolicy {
            initial_interval_ms: duration_to_millis(policy.initial_interval),
            backoff_coefficient: policy.backoff_coefficient,
            maximum_interval_ms: duration_to_millis(policy.maximum_interval),
            maximum_attempts: policy.maximum_attempts,
            non_retryable_error_types: policy.non_retryable_error_types,
        }
    }
}

impl From<pb::RetryPolicy> for api::RetryPolicy {
    fn from(policy: pb::RetryPolicy) -> Self {
        api::RetryPolicy {
            initial_interval: millis_to_duration(policy.initial_interval_ms),
            backoff_coefficient: policy.backoff_coefficient,
            maximum_interval: millis_to_duration(policy.maximum_interval_ms),
            maximum_attempts: policy.maximum_attempts,
            non_retryable_error_types: policy.non_retryable_error_types,
        }
    }
}

impl From<api::FailureInfo> for pb::Failure {
    fn from(failure: api::FailureInfo) -> Self {
        pb::Failure {
            message: failure.message,
            failure_type: failure.failure_type,
            non_retryable: failure.non_retryable,
        }
    }
}

impl From<pb::Failure> for api::FailureInfo {
    fn from(failure: pb::Failure) -> Self {
        api::FailureInfo {
            message: failure.message,
            failure_type: failure.failure_type,
            non_retryable: failure.non_retryable,
        }
    }
}

/// `None` for `Unspecified`, which the service never reports for a known run.
pub fn workflow_status_from_pb(
    status: pb::WorkflowExecutionStatus,
) -> Option<api::WorkflowExecutionStatus> {
    match status {
        pb::WorkflowExecutionStatus::Unspecified => None,
        pb::WorkflowExecutionStatus::Running => Some(api::WorkflowExecutionStatus::Running),
        pb::WorkflowExecutionStatus::Completed => Some(api::WorkflowExecutionStatus::Completed),
        pb::WorkflowExecutionStatus::Failed => Some(api::WorkflowExecutionStatus::Failed),
        pb::WorkflowExecutionStatus::Canceled => Some(api::WorkflowExecutionStatus::Canceled),
        pb::WorkflowExecutionStatus::TimedOut => Some(api::WorkflowExecutionStatus::TimedOut),
    }
}

impl From<api::WorkflowExecutionStatus> for pb::WorkflowExecutionStatus {
    fn from(status: api::WorkflowExecutionStatus) -> Self {
        match status {
            api::WorkflowExecutionStatus::Running => pb::WorkflowExecutionStatus::Running,
            api::WorkflowExecutionStatus::Completed => pb::WorkflowExecutionStatus::Completed,
            api::WorkflowExecutionStatus::Failed => pb::WorkflowExecutionStatus::Failed,
            api::WorkflowExecutionStatus::Canceled => pb::WorkflowExecutionStatus::Canceled,
            api::WorkflowExecutionStatus::TimedOut => pb::WorkflowExecutionStatus::TimedOut,
        }
    }
}
