//! Workflow context and core functions for authoring workflows.
//!
//! Workflow code must be deterministic: everything time-dependent or
//! side-effecting goes through [`WorkflowContext`], which turns it into a
//! [`WorkflowCommand`] for the host to interpret.

use crate::commands::{
    CancelTimerCommand, RequestCancelActivityCommand, ScheduleActivityCommand, StartTimerCommand,
    WorkflowCommand,
};
use crate::future::{CommandFuture, WorkflowError};
use chrono::{DateTime, Utc};
use greetflow_core::{millis_to_datetime, ActivityOptions, DataConverter, JsonDataConverter, WorkflowInfo};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::debug;

/// Trait for handling workflow commands (implemented by the worker and the
/// test environment).
pub trait CommandSink: Send + Sync {
    /// Records `command` before returning. The returned future only reports
    /// the command's outcome, so dropping it does not withdraw the command.
    fn submit(&self, command: WorkflowCommand) -> CommandFuture;
}

/// Deterministic workflow time, shared between a context and its host.
#[derive(Debug, Clone)]
pub struct WorkflowClock {
    millis: Arc<AtomicI64>,
}

impl WorkflowClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(start.timestamp_millis())),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        millis_to_datetime(self.millis.load(Ordering::SeqCst))
    }

    pub fn set(&self, time: DateTime<Utc>) {
        self.millis.store(time.timestamp_millis(), Ordering::SeqCst);
    }

    /// Moves the clock to `time`, never backwards.
    pub fn advance_to(&self, time: DateTime<Utc>) {
        self.millis.fetch_max(time.timestamp_millis(), Ordering::SeqCst);
    }

    pub fn advance(&self, by: Duration) {
        let delta = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.millis.fetch_add(delta, Ordering::SeqCst);
    }
}

/// Builder for WorkflowContext creation with command sink
pub struct WorkflowContextBuilder {
    workflow_info: WorkflowInfo,
    sink: Arc<dyn CommandSink>,
    clock: Option<WorkflowClock>,
    cancellation: Option<watch::Receiver<bool>>,
}

impl WorkflowContextBuilder {
    pub fn new(workflow_info: WorkflowInfo, sink: Arc<dyn CommandSink>) -> Self {
        Self {
            workflow_info,
            sink,
            clock: None,
            cancellation: None,
        }
    }

    /// Share the host's clock; defaults to one starting at the workflow start time.
    pub fn clock(mut self, clock: WorkflowClock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Cancellation signal driven by the host; `true` means cancel requested.
    pub fn cancellation(mut self, cancellation: watch::Receiver<bool>) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    pub fn build(self) -> WorkflowContext {
        let clock = self
            .clock
            .unwrap_or_else(|| WorkflowClock::new(self.workflow_info.start_time));
        let cancellation = self
            .cancellation
            .unwrap_or_else(|| watch::channel(false).1);

        WorkflowContext {
            workflow_info: self.workflow_info,
            command_sink: self.sink,
            sequence: Arc::new(AtomicU64::new(0)),
            clock,
            cancellation,
        }
    }
}

/// Workflow context for executing workflow logic
#[derive(Clone)]
pub struct WorkflowContext {
    workflow_info: WorkflowInfo,
    command_sink: Arc<dyn CommandSink>,
    sequence: Arc<AtomicU64>,
    clock: WorkflowClock,
    cancellation: watch::Receiver<bool>,
}

impl WorkflowContext {
    pub fn builder(workflow_info: WorkflowInfo, sink: Arc<dyn CommandSink>) -> WorkflowContextBuilder {
        WorkflowContextBuilder::new(workflow_info, sink)
    }

    /// Get workflow info
    pub fn workflow_info(&self) -> &WorkflowInfo {
        &self.workflow_info
    }

    /// Execute an activity and wait for its result.
    ///
    /// If the workflow is cancelled while the activity is outstanding, a
    /// cancel request for the activity is issued and `Cancelled` is returned.
    pub async fn execute_activity(
        &self,
        activity_type: &str,
        args: Option<Vec<u8>>,
        options: ActivityOptions,
    ) -> Result<Vec<u8>, WorkflowError> {
        let activity_id = self.next_id();
        if self.is_cancelled() {
            return Err(WorkflowError::Cancelled);
        }

        debug!(activity_id = %activity_id, activity_type, "scheduling activity");
        let outcome = self
            .command_sink
            .submit(WorkflowCommand::ScheduleActivity(ScheduleActivityCommand {
                activity_id: activity_id.clone(),
                activity_type: activity_type.to_string(),
                args,
                options,
            }));

        let mut cancellation = self.cancellation.clone();
        tokio::select! {
            biased;
            result = outcome => result,
            _ = cancellation_requested(&mut cancellation) => {
                debug!(activity_id = %activity_id, "workflow cancelled, cancelling activity");
                drop(self.command_sink.submit(WorkflowCommand::RequestCancelActivity(
                    RequestCancelActivityCommand { activity_id },
                )));
                Err(WorkflowError::Cancelled)
            }
        }
    }

    /// Typed form of [`execute_activity`](Self::execute_activity) using JSON payloads.
    pub async fn call_activity<I, O>(
        &self,
        activity_type: &str,
        input: &I,
        options: ActivityOptions,
    ) -> Result<O, WorkflowError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let converter = JsonDataConverter::new();
        let args = converter.encode(input)?;
        let payload = self
            .execute_activity(activity_type, Some(args), options)
            .await?;
        Ok(converter.decode(&payload)?)
    }

    /// Durable sleep backed by a timer owned by the host.
    pub async fn sleep(&self, duration: Duration) -> Result<(), WorkflowError> {
        let timer_id = self.next_id();
        if self.is_cancelled() {
            return Err(WorkflowError::Cancelled);
        }

        debug!(timer_id = %timer_id, ?duration, "starting timer");
        let fired = self
            .command_sink
            .submit(WorkflowCommand::StartTimer(StartTimerCommand {
                timer_id: timer_id.clone(),
                duration,
            }));

        let mut cancellation = self.cancellation.clone();
        tokio::select! {
            biased;
            result = fired => result.map(|_| ()),
            _ = cancellation_requested(&mut cancellation) => {
                debug!(timer_id = %timer_id, "workflow cancelled, cancelling timer");
                drop(self.command_sink.submit(WorkflowCommand::CancelTimer(
                    CancelTimerCommand { timer_id },
                )));
                Err(WorkflowError::Cancelled)
            }
        }
    }

    /// Get current workflow time (deterministic)
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Check if workflow is cancelled
    pub fn is_cancelled(&self) -> bool {
        *self.cancellation.borrow()
    }

    /// Per-run command ids: "1", "2", ...
    fn next_id(&self) -> String {
        (self.sequence.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }
}

/// Resolves once cancellation is requested; never resolves if the host drops
/// the sender without cancelling.
async fn cancellation_requested(cancellation: &mut watch::Receiver<bool>) {
    loop {
        if *cancellation.borrow_and_update() {
            return;
        }
        if cancellation.changed().await.is_err() {
            return std::future::pending().await;
        }
    }
}
