//! Core types shared by workers, clients and workflow code.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy for activities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Initial retry interval
    pub initial_interval: Duration,
    /// Backoff coefficient (e.g., 2.0 for exponential)
    pub backoff_coefficient: f64,
    /// Maximum retry interval
    pub maximum_interval: Duration,
    /// Maximum number of attempts, 0 means unlimited
    pub maximum_attempts: i32,
    /// Failure types that are never retried
    pub non_retryable_error_types: Vec<String>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_secs(1),
            backoff_coefficient: 2.0,
            maximum_interval: Duration::from_secs(100),
            maximum_attempts: 0, // Unlimited
            non_retryable_error_types: vec![],
        }
    }
}

impl RetryPolicy {
    /// Whether `attempt` (1-based) has used up the attempt budget.
    pub fn attempts_exhausted(&self, attempt: i32) -> bool {
        self.maximum_attempts > 0 && attempt >= self.maximum_attempts
    }

    pub fn is_non_retryable(&self, failure_type: &str) -> bool {
        self.non_retryable_error_types
            .iter()
            .any(|t| t == failure_type)
    }

    /// Delay before the retry that follows `attempt` (1-based).
    pub fn backoff(&self, attempt: i32) -> Duration {
        let exponent = attempt.saturating_sub(1).max(0);
        let secs = self.initial_interval.as_secs_f64() * self.backoff_coefficient.powi(exponent);
        let delay = Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX);
        if self.maximum_interval.is_zero() {
            delay
        } else {
            delay.min(self.maximum_interval)
        }
    }
}

/// Options for scheduling an activity from workflow code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityOptions {
    /// Task queue to schedule the activity on, empty means the workflow's own
    pub task_queue: String,
    /// Schedule to close timeout, zero means unbounded
    pub schedule_to_close_timeout: Duration,
    /// Start to close timeout
    pub start_to_close_timeout: Duration,
    /// Retry policy
    pub retry_policy: Option<RetryPolicy>,
}

impl Default for ActivityOptions {
    fn default() -> Self {
        Self {
            task_queue: String::new(),
            schedule_to_close_timeout: Duration::ZERO,
            start_to_close_timeout: Duration::from_secs(10),
            retry_policy: None,
        }
    }
}

/// Workflow execution identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkflowExecution {
    pub workflow_id: String,
    pub run_id: String,
}

impl WorkflowExecution {
    pub fn new(workflow_id: impl Into<String>, run_id: impl Into<String>) -> Self {
        Self {
            workflow_id: workflow_id.into(),
            run_id: run_id.into(),
        }
    }
}

/// Information about the running workflow, as seen from workflow code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowInfo {
    pub workflow_execution: WorkflowExecution,
    pub workflow_type: String,
    pub namespace: String,
    pub task_queue: String,
    pub start_time: DateTime<Utc>,
    pub attempt: i32,
}

/// Activity information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityInfo {
    pub activity_id: String,
    pub activity_type: String,
    pub task_token: Vec<u8>,
    pub workflow_execution: WorkflowExecution,
    pub attempt: i32,
    pub scheduled_time: DateTime<Utc>,
    pub started_time: DateTime<Utc>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Close status of a workflow execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowExecutionStatus {
    Running,
    Completed,
    Failed,
    Canceled,
    TimedOut,
}

impl WorkflowExecutionStatus {
    pub fn is_closed(&self) -> bool {
        !matches!(self, WorkflowExecutionStatus::Running)
    }
}

/// Failure description carried across the service boundary
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FailureInfo {
    pub message: String,
    pub failure_type: String,
    pub non_retryable: bool,
}

impl FailureInfo {
    pub fn new(
        message: impl Into<String>,
        failure_type: impl Into<String>,
        non_retryable: bool,
    ) -> Self {
        Self {
            message: message.into(),
            failure_type: failure_type.into(),
            non_retryable,
        }
    }
}

impl std::fmt::Display for FailureInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.failure_type.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.failure_type, self.message)
        }
    }
}

/// Worker identity in the form `role@host-pid-N`.
pub fn default_identity(role: &str) -> String {
    format!(
        "{}@{}-pid-{}",
        role,
        std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string()),
        std::process::id()
    )
}

/// RFC 3339 UTC with millisecond precision, e.g. `2026-10-18T09:15:02.114Z`.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn millis_to_datetime(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_default()
}

pub fn duration_to_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

pub fn millis_to_duration(millis: i64) -> Duration {
    Duration::from_millis(millis.max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_grows_and_caps() {
        let policy = RetryPolicy {
            initial_interval: Duration::from_secs(1),
            backoff_coefficient: 2.0,
            maximum_interval: Duration::from_secs(3),
            maximum_attempts: 5,
            non_retryable_error_types: vec![],
        };
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(3));
        assert_eq!(policy.backoff(10), Duration::from_secs(3));
    }

    #[test]
    fn attempts_exhausted_respects_unlimited() {
        let mut policy = RetryPolicy::default();
        assert!(!policy.attempts_exhausted(1_000));
        policy.maximum_attempts = 3;
        assert!(!policy.attempts_exhausted(2));
        assert!(policy.attempts_exhausted(3));
    }

    #[test]
    fn timestamp_has_millis_and_z_suffix() {
        let time = millis_to_datetime(1_700_000_000_123);
        assert_eq!(format_timestamp(time), "2023-11-14T22:13:20.123Z");
    }
}
