//! Worker implementation for hosting workflows and activities.
//!
//! A worker long-polls one task queue for workflow and activity tasks,
//! replays workflow code and executes activities, until it is stopped.

use crate::executor::WorkflowTaskExecutor;
use crate::handlers::{ActivityTaskHandler, WorkflowTaskHandler};
use crate::pollers::{ActivityTaskPoller, PollerManager, WorkflowTaskPoller};
use crate::registry::Registry;
use greetflow_core::{default_identity, TransportError};
use greetflow_proto::WorkflowService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Semaphore};
use tracing::{info, warn};

/// Worker errors
#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Worker already started")]
    AlreadyStarted,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("Task failed: {0}")]
    TaskFailed(String),
    #[error("Worker is shutting down")]
    ShuttingDown,
}

/// What to do with a workflow task whose code diverges from its history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NonDeterministicWorkflowPolicy {
    /// Leave the task unanswered so it is retried, e.g. after a fixed deploy (default)
    #[default]
    BlockWorkflow,
    /// Fail the workflow
    FailWorkflow,
}

/// Worker options for configuration
#[derive(Debug, Clone)]
pub struct WorkerOptions {
    /// Maximum concurrent activity executions
    pub max_concurrent_activity_execution_size: usize,
    /// Maximum concurrent workflow task pollers
    pub max_concurrent_workflow_task_pollers: usize,
    /// Maximum concurrent activity task pollers
    pub max_concurrent_activity_task_pollers: usize,
    /// Delay before polling again after a failed poll
    pub poll_error_backoff: Duration,
    /// How long `stop` waits for running activities
    pub worker_stop_timeout: Duration,
    /// Non-deterministic workflow policy
    pub non_deterministic_workflow_policy: NonDeterministicWorkflowPolicy,
    /// Identity
    pub identity: String,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            max_concurrent_activity_execution_size: 100,
            max_concurrent_workflow_task_pollers: 2,
            max_concurrent_activity_task_pollers: 2,
            poll_error_backoff: Duration::from_secs(1),
            worker_stop_timeout: Duration::from_secs(10),
            non_deterministic_workflow_policy: NonDeterministicWorkflowPolicy::default(),
            identity: default_identity("greetflow-worker"),
        }
    }
}

impl WorkerOptions {
    fn validate(&self) -> Result<(), WorkerError> {
        if self.max_concurrent_activity_execution_size == 0 {
            return Err(WorkerError::InvalidConfiguration(
                "max_concurrent_activity_execution_size must be at least 1".to_string(),
            ));
        }
        if u32::try_from(self.max_concurrent_activity_execution_size).is_err() {
            return Err(WorkerError::InvalidConfiguration(
                "max_concurrent_activity_execution_size is too large".to_string(),
            ));
        }
        if self.max_concurrent_workflow_task_pollers == 0
            || self.max_concurrent_activity_task_pollers == 0
        {
            return Err(WorkerError::InvalidConfiguration(
                "at least one workflow and one activity poller is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// Worker implementation
pub struct GreetflowWorker {
    service: Arc<dyn WorkflowService>,
    namespace: String,
    task_queue: String,
    options: WorkerOptions,
    registry: Arc<dyn Registry>,
    stop_tx: watch::Sender<bool>,
    activity_slots: Arc<Semaphore>,
    pollers: Option<PollerManager>,
}

impl GreetflowWorker {
    pub fn new(
        service: Arc<dyn WorkflowService>,
        namespace: impl Into<String>,
        task_queue: impl Into<String>,
        options: WorkerOptions,
        registry: Arc<dyn Registry>,
    ) -> Self {
        let (stop_tx, _) = watch::channel(false);
        let activity_slots = Arc::new(Semaphore::new(options.max_concurrent_activity_execution_size));
        Self {
            service,
            namespace: namespace.into(),
            task_queue: task_queue.into(),
            options,
            registry,
            stop_tx,
            activity_slots,
            pollers: None,
        }
    }

    pub fn task_queue(&self) -> &str {
        &self.task_queue
    }

    /// Start the pollers and return immediately
    pub fn start(&mut self) -> Result<(), WorkerError> {
        if self.pollers.is_some() {
            return Err(WorkerError::AlreadyStarted);
        }
        if *self.stop_tx.borrow() {
            return Err(WorkerError::ShuttingDown);
        }
        self.options.validate()?;

        let identity = self.options.identity.clone();
        let mut pollers =
            PollerManager::new(self.stop_tx.subscribe(), self.options.poll_error_backoff);

        let workflow_handler = Arc::new(WorkflowTaskHandler::new(
            self.service.clone(),
            WorkflowTaskExecutor::new(
                self.registry.clone(),
                self.namespace.clone(),
                self.task_queue.clone(),
                self.options.non_deterministic_workflow_policy,
            ),
            identity.clone(),
        ));
        let workflow_poller = Arc::new(WorkflowTaskPoller::new(
            self.service.clone(),
            self.namespace.clone(),
            self.task_queue.clone(),
            identity.clone(),
            workflow_handler,
        ));
        for _ in 0..self.options.max_concurrent_workflow_task_pollers {
            pollers.spawn("workflow", workflow_poller.clone());
        }

        let activity_handler = Arc::new(ActivityTaskHandler::new(
            self.service.clone(),
            self.registry.clone(),
            identity.clone(),
            self.stop_tx.subscribe(),
        ));
        let activity_poller = Arc::new(ActivityTaskPoller::new(
            self.service.clone(),
            self.namespace.clone(),
            self.task_queue.clone(),
            identity.clone(),
            activity_handler,
            self.activity_slots.clone(),
        ));
        for _ in 0..self.options.max_concurrent_activity_task_pollers {
            pollers.spawn("activity", activity_poller.clone());
        }

        info!(
            namespace = %self.namespace,
            task_queue = %self.task_queue,
            identity = %identity,
            pollers = pollers.len(),
            workflows = ?self.registry.get_registered_workflows(),
            activities = ?self.registry.get_registered_activities(),
            "worker started"
        );
        self.pollers = Some(pollers);
        Ok(())
    }

    /// Stop polling and wait (up to `worker_stop_timeout`) for running activities
    pub async fn stop(&mut self) {
        self.stop_tx.send_replace(true);
        let Some(mut pollers) = self.pollers.take() else {
            return;
        };
        pollers.join().await;

        // Every slot free means no activity is still running.
        let all_slots = self.options.max_concurrent_activity_execution_size as u32;
        match tokio::time::timeout(
            self.options.worker_stop_timeout,
            self.activity_slots.acquire_many(all_slots),
        )
        .await
        {
            Ok(_) => info!(task_queue = %self.task_queue, "worker stopped"),
            Err(_) => warn!(
                task_queue = %self.task_queue,
                timeout = ?self.options.worker_stop_timeout,
                "worker stopped with activities still running"
            ),
        }
    }
}

impl Drop for GreetflowWorker {
    fn drop(&mut self) {
        self.stop_tx.send_replace(true);
    }
}
