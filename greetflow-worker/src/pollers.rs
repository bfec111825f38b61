//! Task pollers for polling workflow and activity tasks from the service.
//!
//! Each poller runs in its own tokio task, long-polling the service and
//! dispatching tasks to its handler until the worker's stop signal flips.

use crate::handlers::{ActivityTaskHandler, WorkflowTaskHandler};
use crate::worker::WorkerError;
use async_trait::async_trait;
use greetflow_proto::generated::{
    PollActivityTaskRequest, PollActivityTaskResponse, PollWorkflowTaskRequest,
    PollWorkflowTaskResponse,
};
use greetflow_proto::WorkflowService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

/// Task poller trait
#[async_trait]
pub trait TaskPoller: Send + Sync {
    type Task: Send;

    /// Poll for a new task; `None` when the long-poll returned no work
    async fn poll(&self) -> Result<Option<Self::Task>, WorkerError>;

    /// Process a task
    async fn process(&self, task: Self::Task) -> Result<(), WorkerError>;
}

/// Workflow task poller
pub struct WorkflowTaskPoller {
    service: Arc<dyn WorkflowService>,
    request: PollWorkflowTaskRequest,
    handler: Arc<WorkflowTaskHandler>,
}

impl WorkflowTaskPoller {
    pub fn new(
        service: Arc<dyn WorkflowService>,
        namespace: impl Into<String>,
        task_queue: impl Into<String>,
        identity: impl Into<String>,
        handler: Arc<WorkflowTaskHandler>,
    ) -> Self {
        Self {
            service,
            request: PollWorkflowTaskRequest {
                namespace: namespace.into(),
                task_queue: task_queue.into(),
                identity: identity.into(),
            },
            handler,
        }
    }
}

#[async_trait]
impl TaskPoller for WorkflowTaskPoller {
    type Task = PollWorkflowTaskResponse;

    async fn poll(&self) -> Result<Option<Self::Task>, WorkerError> {
        let response = self.service.poll_workflow_task(self.request.clone()).await?;
        if response.task_token.is_empty() {
            return Ok(None);
        }
        Ok(Some(response))
    }

    async fn process(&self, task: Self::Task) -> Result<(), WorkerError> {
        self.handler.handle(task).await
    }
}

/// Activity task poller
///
/// Holds an execution slot before polling so the worker never accepts more
/// activity tasks than it can run. Tasks run on their own tokio task and
/// release the slot when they finish.
pub struct ActivityTaskPoller {
    service: Arc<dyn WorkflowService>,
    request: PollActivityTaskRequest,
    handler: Arc<ActivityTaskHandler>,
    slots: Arc<Semaphore>,
}

impl ActivityTaskPoller {
    pub fn new(
        service: Arc<dyn WorkflowService>,
        namespace: impl Into<String>,
        task_queue: impl Into<String>,
        identity: impl Into<String>,
        handler: Arc<ActivityTaskHandler>,
        slots: Arc<Semaphore>,
    ) -> Self {
        Self {
            service,
            request: PollActivityTaskRequest {
                namespace: namespace.into(),
                task_queue: task_queue.into(),
                identity: identity.into(),
            },
            handler,
            slots,
        }
    }
}

#[async_trait]
impl TaskPoller for ActivityTaskPoller {
    type Task = (OwnedSemaphorePermit, PollActivityTaskResponse);

    async fn poll(&self) -> Result<Option<Self::Task>, WorkerError> {
        let permit = self
            .slots
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| WorkerError::ShuttingDown)?;
        let response = self.service.poll_activity_task(self.request.clone()).await?;
        if response.task_token.is_empty() {
            return Ok(None);
        }
        Ok(Some((permit, response)))
    }

    async fn process(&self, task: Self::Task) -> Result<(), WorkerError> {
        let (permit, task) = task;
        let handler = self.handler.clone();
        tokio::spawn(async move {
            let activity_type = task.activity_type.clone();
            if let Err(e) = handler.handle(task).await {
                error!(activity_type = %activity_type, error = %e, "activity task failed");
            }
            drop(permit);
        });
        Ok(())
    }
}

/// Poller manager that runs multiple pollers
pub struct PollerManager {
    stop: watch::Receiver<bool>,
    poll_error_backoff: Duration,
    join_handles: Vec<JoinHandle<()>>,
}

impl PollerManager {
    pub fn new(stop: watch::Receiver<bool>, poll_error_backoff: Duration) -> Self {
        Self {
            stop,
            poll_error_backoff,
            join_handles: Vec::new(),
        }
    }

    /// Spawn a poll loop for `poller`
    pub fn spawn<P>(&mut self, kind: &'static str, poller: Arc<P>)
    where
        P: TaskPoller + 'static,
    {
        let mut stop = self.stop.clone();
        let backoff = self.poll_error_backoff;
        let handle = tokio::spawn(async move {
            debug!(kind, "poller started");
            loop {
                if *stop.borrow_and_update() {
                    break;
                }
                let polled = tokio::select! {
                    biased;
                    _ = stop.changed() => break,
                    polled = poller.poll() => polled,
                };
                match polled {
                    Ok(Some(task)) => {
                        if let Err(e) = poller.process(task).await {
                            error!(kind, error = %e, "error processing task");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(kind, error = %e, ?backoff, "error polling task");
                        tokio::select! {
                            _ = stop.changed() => break,
                            _ = tokio::time::sleep(backoff) => {}
                        }
                    }
                }
            }
            debug!(kind, "poller stopped");
        });
        self.join_handles.push(handle);
    }

    pub fn len(&self) -> usize {
        self.join_handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.join_handles.is_empty()
    }

    /// Wait for every poll loop to exit; callers flip the stop signal first.
    pub async fn join(&mut self) {
        for handle in self.join_handles.drain(..) {
            if let Err(e) = handle.await {
                if e.is_panic() {
                    error!(error = %e, "poller panicked");
                }
            }
        }
    }
}
