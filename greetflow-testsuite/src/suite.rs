//! Test workflow environment.
//!
//! Workflow code runs against the same [`WorkflowContext`] it sees in a
//! worker, backed by an in-process [`CommandSink`] that executes activities
//! directly, applies their retry policy and fires timers. Timers skip ahead
//! on the environment's clock unless time skipping is turned off.

use chrono::{DateTime, Utc};
use futures::FutureExt;
use greetflow_activity::ActivityContext;
use greetflow_core::{
    ActivityInfo, DataConverter, FailureInfo, JsonDataConverter, RetryPolicy, WorkflowExecution,
    WorkflowInfo,
};
use greetflow_worker::{Activity, ActivityError, Registry, Workflow, WorkflowRegistry};
use greetflow_workflow::{
    CommandFuture, CommandSink, ScheduleActivityCommand, WorkflowClock, WorkflowCommand,
    WorkflowContext, WorkflowError,
};
use serde::{de::DeserializeOwned, Serialize};
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

const TEST_TASK_QUEUE: &str = "test-task-queue";

/// One activity attempt run by the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedActivity {
    pub activity_type: String,
    pub attempt: i32,
    pub succeeded: bool,
}

/// Requests cancellation of workflows run by a [`TestWorkflowEnvironment`]
#[derive(Clone)]
pub struct CancelHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// State shared between the environment and its command sinks
struct Shared {
    registry: Arc<WorkflowRegistry>,
    clock: WorkflowClock,
    time_skipping: Mutex<bool>,
    cancel: Arc<watch::Sender<bool>>,
    executed: Mutex<Vec<ExecutedActivity>>,
    commands: Mutex<Vec<WorkflowCommand>>,
}

impl Shared {
    fn time_skipping(&self) -> bool {
        *self.time_skipping.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Let `duration` of workflow time pass.
    async fn elapse(&self, duration: Duration) {
        if !self.time_skipping() {
            tokio::time::sleep(duration).await;
        }
        self.clock.advance(duration);
    }

    fn record_attempt(&self, activity_type: &str, attempt: i32, succeeded: bool) {
        self.executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ExecutedActivity {
                activity_type: activity_type.to_string(),
                attempt,
                succeeded,
            });
    }
}

/// Test workflow environment for running workflow tests
pub struct TestWorkflowEnvironment {
    workflow_id: String,
    run_id: String,
    shared: Arc<Shared>,
}

impl TestWorkflowEnvironment {
    pub fn new() -> Self {
        let (cancel, _) = watch::channel(false);
        Self {
            workflow_id: format!("test-workflow-{}", uuid::Uuid::new_v4()),
            run_id: uuid::Uuid::new_v4().to_string(),
            shared: Arc::new(Shared {
                registry: Arc::new(WorkflowRegistry::new()),
                clock: WorkflowClock::new(Utc::now()),
                time_skipping: Mutex::new(true),
                cancel: Arc::new(cancel),
                executed: Mutex::new(Vec::new()),
                commands: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Registry the environment resolves workflow and activity names from
    pub fn registry(&self) -> Arc<WorkflowRegistry> {
        self.shared.registry.clone()
    }

    pub fn register_workflow(&self, name: &str, workflow: Box<dyn Workflow>) {
        self.shared.registry.register_workflow(name, workflow);
    }

    pub fn register_activity(&self, name: &str, activity: Box<dyn Activity>) {
        self.shared.registry.register_activity(name, activity);
    }

    /// With time skipping (the default) timers and retry backoff complete
    /// immediately and only move the workflow clock. Without it they wait
    /// on the tokio clock.
    pub fn set_time_skipping(&self, enabled: bool) {
        *self
            .shared
            .time_skipping
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = enabled;
    }

    /// Handle for cancelling a running workflow from another task
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: self.shared.cancel.clone(),
        }
    }

    /// Cancel the workflow; takes effect at its next step if it is running
    pub fn cancel_workflow(&self) {
        self.cancel_handle().cancel();
    }

    pub fn set_workflow_time(&self, time: DateTime<Utc>) {
        self.shared.clock.set(time);
    }

    /// Current workflow time
    pub fn now(&self) -> DateTime<Utc> {
        self.shared.clock.now()
    }

    /// Every activity attempt so far, in order
    pub fn executed_activities(&self) -> Vec<ExecutedActivity> {
        self.shared
            .executed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn was_activity_executed(&self, activity_type: &str) -> bool {
        self.executed_activities()
            .iter()
            .any(|a| a.activity_type == activity_type)
    }

    /// Every command workflow code issued, in order
    pub fn commands(&self) -> Vec<WorkflowCommand> {
        self.shared
            .commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Execute a registered workflow by name with typed input
    pub async fn execute_workflow<I, O>(&self, name: &str, input: I) -> Result<O, WorkflowError>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let workflow = self
            .shared
            .registry
            .get_workflow(name)
            .ok_or_else(|| WorkflowError::Generic(format!("workflow '{name}' not registered")))?;
        let converter = JsonDataConverter::new();
        let input = converter.encode(&input)?;

        let info = WorkflowInfo {
            workflow_execution: WorkflowExecution::new(&self.workflow_id, &self.run_id),
            workflow_type: name.to_string(),
            namespace: "default".to_string(),
            task_queue: TEST_TASK_QUEUE.to_string(),
            start_time: self.shared.clock.now(),
            attempt: 1,
        };
        let sink = Arc::new(TestCommandSink {
            shared: self.shared.clone(),
            workflow_execution: info.workflow_execution.clone(),
        });
        let ctx = WorkflowContext::builder(info, sink)
            .clock(self.shared.clock.clone())
            .cancellation(self.shared.cancel.subscribe())
            .build();

        info!(workflow_type = name, workflow_id = %self.workflow_id, "executing workflow");
        let output = workflow.execute(ctx, Some(input)).await?;
        Ok(converter.decode(&output)?)
    }

    /// Execute an activity directly (one attempt, no workflow)
    pub async fn execute_activity<I, O>(&self, name: &str, input: I) -> Result<O, ActivityError>
    where
        I: Serialize,
        O: DeserializeOwned,
    {
        let activity = self
            .shared
            .registry
            .get_activity(name)
            .ok_or_else(|| ActivityError::non_retryable(format!("activity '{name}' not registered")))?;
        let converter = JsonDataConverter::new();
        let input = converter
            .encode(&input)
            .map_err(|e| ActivityError::non_retryable(e.to_string()))?;

        let ctx = ActivityContext::new(activity_info(
            format!("test-activity-{}", uuid::Uuid::new_v4()),
            name,
            WorkflowExecution::new(&self.workflow_id, &self.run_id),
            1,
        ));
        let output = run_attempt(activity.as_ref(), &ctx, Some(input), Duration::ZERO).await;
        self.shared.record_attempt(name, 1, output.is_ok());
        converter
            .decode(&output?)
            .map_err(|e| ActivityError::non_retryable(e.to_string()))
    }
}

impl Default for TestWorkflowEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

fn activity_info(
    activity_id: String,
    activity_type: &str,
    workflow_execution: WorkflowExecution,
    attempt: i32,
) -> ActivityInfo {
    let now = Utc::now();
    ActivityInfo {
        activity_id,
        activity_type: activity_type.to_string(),
        task_token: Vec::new(),
        workflow_execution,
        attempt,
        scheduled_time: now,
        started_time: now,
        deadline: None,
    }
}

/// Run one attempt, turning panics and an elapsed start-to-close timeout into errors.
async fn run_attempt(
    activity: &dyn Activity,
    ctx: &ActivityContext,
    input: Option<Vec<u8>>,
    start_to_close: Duration,
) -> Result<Vec<u8>, ActivityError> {
    let attempt = AssertUnwindSafe(activity.execute(ctx, input)).catch_unwind();
    let joined = if start_to_close.is_zero() {
        attempt.await
    } else {
        match tokio::time::timeout(start_to_close, attempt).await {
            Ok(joined) => joined,
            Err(_) => return Err(ActivityError::Timeout(start_to_close)),
        }
    };
    joined.unwrap_or_else(|panic| {
        let message = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(ActivityError::Panic(message))
    })
}

/// Executes workflow commands in-process
struct TestCommandSink {
    shared: Arc<Shared>,
    workflow_execution: WorkflowExecution,
}

impl TestCommandSink {
    fn run_activity(&self, cmd: ScheduleActivityCommand) -> CommandFuture {
        let shared = self.shared.clone();
        let workflow_execution = self.workflow_execution.clone();
        Box::pin(async move {
            let Some(activity) = shared.registry.get_activity(&cmd.activity_type) else {
                return Err(WorkflowError::ActivityFailed(FailureInfo::new(
                    format!("activity '{}' not registered", cmd.activity_type),
                    "ActivityNotRegistered",
                    true,
                )));
            };
            // Without a policy an activity gets a single attempt.
            let policy = cmd.options.retry_policy.clone().unwrap_or(RetryPolicy {
                maximum_attempts: 1,
                ..Default::default()
            });

            let mut attempt = 1;
            loop {
                let ctx = ActivityContext::new(activity_info(
                    cmd.activity_id.clone(),
                    &cmd.activity_type,
                    workflow_execution.clone(),
                    attempt,
                ))
                .with_worker_stop_channel(shared.cancel.subscribe());

                let result = run_attempt(
                    activity.as_ref(),
                    &ctx,
                    cmd.args.clone(),
                    cmd.options.start_to_close_timeout,
                )
                .await;
                shared.record_attempt(&cmd.activity_type, attempt, result.is_ok());

                let err = match result {
                    Ok(output) => return Ok(output),
                    Err(err) => err,
                };
                if !err.is_retryable()
                    || policy.is_non_retryable(err.failure_type())
                    || policy.attempts_exhausted(attempt)
                {
                    warn!(activity_type = %cmd.activity_type, attempt, error = %err, "activity failed");
                    let mut failure = err.to_failure();
                    failure.non_retryable = true;
                    return Err(WorkflowError::ActivityFailed(failure));
                }

                let backoff = policy.backoff(attempt);
                debug!(activity_type = %cmd.activity_type, attempt, ?backoff, error = %err, "retrying activity");
                shared.elapse(backoff).await;
                attempt += 1;
            }
        })
    }
}

impl CommandSink for TestCommandSink {
    fn submit(&self, command: WorkflowCommand) -> CommandFuture {
        self.shared
            .commands
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(command.clone());

        match command {
            WorkflowCommand::ScheduleActivity(cmd) => self.run_activity(cmd),
            WorkflowCommand::StartTimer(cmd) => {
                let shared = self.shared.clone();
                Box::pin(async move {
                    shared.elapse(cmd.duration).await;
                    Ok(Vec::new())
                })
            }
            // Dropping the pending future already stopped the step.
            WorkflowCommand::RequestCancelActivity(_) | WorkflowCommand::CancelTimer(_) => {
                Box::pin(async { Ok(Vec::new()) })
            }
            WorkflowCommand::CompleteWorkflow(_)
            | WorkflowCommand::FailWorkflow(_)
            | WorkflowCommand::CancelWorkflow(_) => Box::pin(async {
                Err(WorkflowError::Generic(
                    "workflow close commands are issued by the host".to_string(),
                ))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greetflow_core::ActivityOptions;
    use greetflow_worker::{activity_fn, workflow_fn};
    use std::sync::atomic::{AtomicI32, Ordering};

    async fn double(_ctx: ActivityContext, n: i32) -> Result<i32, ActivityError> {
        Ok(n * 2)
    }

    async fn nap(ctx: WorkflowContext, secs: u64) -> Result<i64, WorkflowError> {
        let before = ctx.now();
        ctx.sleep(Duration::from_secs(secs)).await?;
        Ok((ctx.now() - before).num_seconds())
    }

    #[tokio::test]
    async fn activity_runs_directly() {
        let env = TestWorkflowEnvironment::new();
        env.register_activity("double", activity_fn(double));

        let result: i32 = env.execute_activity("double", 21).await.unwrap();
        assert_eq!(result, 42);
        assert!(env.was_activity_executed("double"));
    }

    #[tokio::test]
    async fn sleep_skips_time_on_the_workflow_clock() {
        let env = TestWorkflowEnvironment::new();
        env.register_workflow("nap", workflow_fn(nap));

        let elapsed: i64 = env.execute_workflow("nap", 3600u64).await.unwrap();
        assert_eq!(elapsed, 3600);
    }

    #[tokio::test(start_paused = true)]
    async fn sleep_waits_when_time_skipping_is_off() {
        let env = TestWorkflowEnvironment::new();
        env.register_workflow("nap", workflow_fn(nap));
        env.set_time_skipping(false);

        let started = tokio::time::Instant::now();
        let _: i64 = env.execute_workflow("nap", 5u64).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test]
    async fn retry_policy_bounds_attempts() {
        let calls = Arc::new(AtomicI32::new(0));
        let counter = calls.clone();
        let flaky = move |_ctx: ActivityContext, _: ()| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ActivityError::retryable("flaky"))
            }
        };
        let call_flaky = |ctx: WorkflowContext, _: ()| async move {
            let options = ActivityOptions {
                retry_policy: Some(RetryPolicy {
                    maximum_attempts: 3,
                    ..Default::default()
                }),
                ..Default::default()
            };
            ctx.call_activity::<(), ()>("flaky", &(), options).await
        };

        let env = TestWorkflowEnvironment::new();
        env.register_activity("flaky", activity_fn(flaky));
        env.register_workflow("call_flaky", workflow_fn(call_flaky));

        let err = env.execute_workflow::<(), ()>("call_flaky", ()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::ActivityFailed(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let attempts: Vec<i32> = env.executed_activities().iter().map(|a| a.attempt).collect();
        assert_eq!(attempts, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn cancelled_environment_stops_workflow() {
        let env = TestWorkflowEnvironment::new();
        env.register_workflow("nap", workflow_fn(nap));
        env.cancel_workflow();

        let err = env.execute_workflow::<_, i64>("nap", 1u64).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Cancelled));
        assert!(env.commands().is_empty());
    }
}
