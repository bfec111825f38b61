//! Greeting and farewell activities.
//!
//! The message is a pure function of the name, so retried attempts produce
//! the same greeting; only the timestamp differs.

use chrono::Utc;
use greetflow_activity::ActivityContext;
use greetflow_core::format_timestamp;
use greetflow_worker::ActivityError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Stands in for the network call a real activity would make.
pub const ACTIVITY_LATENCY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetInput {
    pub name: String,
}

impl GreetInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GreetOutput {
    pub greeting: String,
    /// RFC 3339 completion time, UTC with milliseconds
    pub timestamp: String,
}

pub async fn greet(ctx: ActivityContext, input: GreetInput) -> Result<GreetOutput, ActivityError> {
    respond(&ctx, format!("Hello, {}!", input.name)).await
}

pub async fn farewell(
    ctx: ActivityContext,
    input: GreetInput,
) -> Result<GreetOutput, ActivityError> {
    respond(&ctx, format!("Goodbye, {}!", input.name)).await
}

async fn respond(ctx: &ActivityContext, greeting: String) -> Result<GreetOutput, ActivityError> {
    tokio::select! {
        _ = tokio::time::sleep(ACTIVITY_LATENCY) => {}
        _ = ctx.cancelled() => return Err(ActivityError::WorkerShutdown),
    }

    let info = ctx.get_info();
    info!(
        activity_type = %info.activity_type,
        attempt = info.attempt,
        %greeting,
        "activity finished"
    );
    Ok(GreetOutput {
        greeting,
        timestamp: format_timestamp(Utc::now()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use greetflow_core::{ActivityInfo, WorkflowExecution};
    use tokio::sync::watch;

    fn ctx() -> ActivityContext {
        ActivityContext::new(ActivityInfo {
            activity_id: "1".to_string(),
            activity_type: "greet".to_string(),
            task_token: Vec::new(),
            workflow_execution: WorkflowExecution::new("wf", "run"),
            attempt: 1,
            scheduled_time: Utc::now(),
            started_time: Utc::now(),
            deadline: None,
        })
    }

    #[tokio::test(start_paused = true)]
    async fn greet_takes_simulated_latency() {
        let started = tokio::time::Instant::now();
        let output = greet(ctx(), GreetInput::new("Ada")).await.unwrap();
        assert_eq!(output.greeting, "Hello, Ada!");
        assert!(started.elapsed() >= ACTIVITY_LATENCY);
    }

    #[tokio::test]
    async fn timestamp_is_utc_millis() {
        let output = farewell(ctx(), GreetInput::new("Ada")).await.unwrap();
        assert_eq!(output.greeting, "Goodbye, Ada!");
        assert!(output.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&output.timestamp).is_ok());
        // e.g. 2026-10-18T09:15:02.114Z
        assert_eq!(output.timestamp.len(), 24);
    }

    #[tokio::test]
    async fn worker_shutdown_leaves_attempt_retryable() {
        let (tx, rx) = watch::channel(true);
        let err = greet(ctx().with_worker_stop_channel(rx), GreetInput::new("Ada"))
            .await
            .unwrap_err();
        assert!(matches!(err, ActivityError::WorkerShutdown));
        assert!(!err.to_failure().non_retryable);
        drop(tx);
    }
}
