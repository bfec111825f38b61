//! Activity task handler for processing activity tasks.

use crate::registry::{ActivityError, Registry};
use crate::worker::WorkerError;
use chrono::Utc;
use greetflow_activity::ActivityContext;
use greetflow_core::{millis_to_datetime, millis_to_duration, ActivityInfo, WorkflowExecution};
use greetflow_proto::generated::{
    PollActivityTaskResponse, RespondActivityTaskCompletedRequest,
    RespondActivityTaskFailedRequest,
};
use greetflow_proto::WorkflowService;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Activity task handler
pub struct ActivityTaskHandler {
    service: Arc<dyn WorkflowService>,
    registry: Arc<dyn Registry>,
    identity: String,
    worker_stop: watch::Receiver<bool>,
}

impl ActivityTaskHandler {
    pub fn new(
        service: Arc<dyn WorkflowService>,
        registry: Arc<dyn Registry>,
        identity: impl Into<String>,
        worker_stop: watch::Receiver<bool>,
    ) -> Self {
        Self {
            service,
            registry,
            identity: identity.into(),
            worker_stop,
        }
    }

    /// Run the activity and report its outcome.
    pub async fn handle(&self, task: PollActivityTaskResponse) -> Result<(), WorkerError> {
        let activity_type = task.activity_type.clone();

        let Some(activity) = self.registry.get_activity(&activity_type) else {
            warn!(activity_type = %activity_type, "activity not registered on this worker");
            let err = ActivityError::non_retryable(format!(
                "activity '{activity_type}' not registered"
            ));
            self.respond_failed(&task, &err).await?;
            return Err(WorkerError::TaskFailed(err.to_string()));
        };

        let started_time = Utc::now();
        let start_to_close = millis_to_duration(task.start_to_close_timeout_ms);
        let deadline = (!start_to_close.is_zero())
            .then(|| chrono::Duration::from_std(start_to_close).ok())
            .flatten()
            .map(|timeout| started_time + timeout);

        let info = ActivityInfo {
            activity_id: task.activity_id.clone(),
            activity_type: activity_type.clone(),
            task_token: task.task_token.clone(),
            workflow_execution: task
                .workflow_execution
                .clone()
                .map(Into::into)
                .unwrap_or_else(|| WorkflowExecution::new("", "")),
            attempt: task.attempt,
            scheduled_time: millis_to_datetime(task.scheduled_time_ms),
            started_time,
            deadline,
        };
        let ctx = ActivityContext::new(info).with_worker_stop_channel(self.worker_stop.clone());
        let input = (!task.input.is_empty()).then(|| task.input.clone());

        info!(
            activity_type = %activity_type,
            activity_id = %task.activity_id,
            attempt = task.attempt,
            "executing activity"
        );

        // Spawned so a panicking activity surfaces as a JoinError.
        let mut handle = tokio::spawn(activity.execute(&ctx, input));
        let joined = if start_to_close.is_zero() {
            (&mut handle).await
        } else {
            match tokio::time::timeout(start_to_close, &mut handle).await {
                Ok(joined) => joined,
                Err(_) => {
                    handle.abort();
                    Ok(Err(ActivityError::Timeout(start_to_close)))
                }
            }
        };

        let result = match joined {
            Ok(result) => result,
            Err(join_error) if join_error.is_panic() => {
                Err(ActivityError::Panic(join_error.to_string()))
            }
            Err(_) => Err(ActivityError::Cancelled),
        };
        // An attempt interrupted by shutdown belongs to the next worker.
        let result = match result {
            Err(ActivityError::Cancelled) if *self.worker_stop.borrow() => {
                Err(ActivityError::WorkerShutdown)
            }
            other => other,
        };

        match result {
            Ok(output) => {
                self.service
                    .respond_activity_task_completed(RespondActivityTaskCompletedRequest {
                        task_token: task.task_token,
                        result: output,
                        identity: self.identity.clone(),
                    })
                    .await?;
                info!(activity_type = %activity_type, "activity completed");
                Ok(())
            }
            Err(err) => {
                error!(
                    activity_type = %activity_type,
                    attempt = task.attempt,
                    retryable = err.is_retryable(),
                    error = %err,
                    "activity failed"
                );
                self.respond_failed(&task, &err).await?;
                Ok(())
            }
        }
    }

    async fn respond_failed(
        &self,
        task: &PollActivityTaskResponse,
        err: &ActivityError,
    ) -> Result<(), WorkerError> {
        self.service
            .respond_activity_task_failed(RespondActivityTaskFailedRequest {
                task_token: task.task_token.clone(),
                failure: Some(err.to_failure().into()),
                identity: self.identity.clone(),
            })
            .await?;
        Ok(())
    }
}
