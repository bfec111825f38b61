//! Workflow client: start executions, await results, request cancellation.

use crate::grpc::GrpcWorkflowServiceClient;
use crate::options::{ClientOptions, StartWorkflowOptions};
use async_trait::async_trait;
use greetflow_core::{
    duration_to_millis, FailureInfo, GreetflowError, GreetflowResult, WorkflowExecution,
    WorkflowExecutionStatus,
};
use greetflow_proto::conversions::workflow_status_from_pb;
use greetflow_proto::generated::{
    GetWorkflowExecutionResultRequest, RequestCancelWorkflowExecutionRequest,
    StartWorkflowExecutionRequest,
};
use greetflow_proto::WorkflowService;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Client trait for workflow operations
#[async_trait]
pub trait Client: Send + Sync {
    /// Start a workflow execution
    async fn start_workflow(
        &self,
        options: StartWorkflowOptions,
        workflow_type: &str,
        args: Option<&[u8]>,
    ) -> GreetflowResult<WorkflowExecution>;

    /// Start a workflow execution and return a handle for its result
    async fn execute_workflow(
        &self,
        options: StartWorkflowOptions,
        workflow_type: &str,
        args: Option<&[u8]>,
    ) -> GreetflowResult<Box<dyn WorkflowRun>>;

    /// Handle to an existing execution; an empty `run_id` means the latest run
    fn get_workflow(&self, workflow_id: &str, run_id: &str) -> Box<dyn WorkflowRun>;

    /// Request cancellation of a workflow execution
    async fn cancel_workflow(
        &self,
        workflow_id: &str,
        run_id: Option<&str>,
        reason: Option<&str>,
    ) -> GreetflowResult<()>;
}

/// Workflow run handle for retrieving results
#[async_trait]
pub trait WorkflowRun: Send + Sync {
    fn workflow_id(&self) -> &str;
    fn run_id(&self) -> &str;
    /// Wait for the execution to close. `None` when it completed without a result.
    async fn get(&self) -> GreetflowResult<Option<Vec<u8>>>;
    /// Like [`get`](Self::get), giving up after `timeout`
    async fn get_with_timeout(&self, timeout: Duration) -> GreetflowResult<Option<Vec<u8>>>;
}

/// Client implementation
#[derive(Clone)]
pub struct WorkflowClient {
    service: Arc<dyn WorkflowService>,
    namespace: String,
    options: ClientOptions,
}

impl WorkflowClient {
    /// Create a new WorkflowClient from an existing service
    pub fn new(
        service: Arc<dyn WorkflowService>,
        namespace: impl Into<String>,
        options: ClientOptions,
    ) -> Self {
        Self {
            service,
            namespace: namespace.into(),
            options,
        }
    }

    /// Connect to the workflow service over gRPC
    pub async fn connect(
        address: impl AsRef<str>,
        namespace: impl Into<String>,
        options: ClientOptions,
    ) -> GreetflowResult<Self> {
        let service = GrpcWorkflowServiceClient::connect(address, options.connect_timeout).await?;
        Ok(Self::new(Arc::new(service), namespace, options))
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn service(&self) -> Arc<dyn WorkflowService> {
        self.service.clone()
    }

    fn handle(&self, execution: WorkflowExecution) -> Box<dyn WorkflowRun> {
        Box::new(WorkflowRunImpl {
            client: self.clone(),
            execution,
        })
    }
}

#[async_trait]
impl Client for WorkflowClient {
    async fn start_workflow(
        &self,
        options: StartWorkflowOptions,
        workflow_type: &str,
        args: Option<&[u8]>,
    ) -> GreetflowResult<WorkflowExecution> {
        if options.id.is_empty() {
            return Err(GreetflowError::InvalidArgument(
                "workflow id is required".to_string(),
            ));
        }
        if options.task_queue.is_empty() {
            return Err(GreetflowError::InvalidArgument(
                "task queue is required".to_string(),
            ));
        }

        let request = StartWorkflowExecutionRequest {
            namespace: self.namespace.clone(),
            workflow_id: options.id.clone(),
            workflow_type: workflow_type.to_string(),
            task_queue: options.task_queue.clone(),
            input: args.map(<[u8]>::to_vec).unwrap_or_default(),
            identity: self.options.identity.clone(),
            request_id: Uuid::new_v4().to_string(),
            execution_timeout_ms: options.execution_timeout.map(duration_to_millis).unwrap_or(0),
        };
        let response = self.service.start_workflow_execution(request).await?;

        info!(
            workflow_id = %options.id,
            run_id = %response.run_id,
            workflow_type,
            task_queue = %options.task_queue,
            "workflow started"
        );
        Ok(WorkflowExecution::new(options.id, response.run_id))
    }

    async fn execute_workflow(
        &self,
        options: StartWorkflowOptions,
        workflow_type: &str,
        args: Option<&[u8]>,
    ) -> GreetflowResult<Box<dyn WorkflowRun>> {
        let execution = self.start_workflow(options, workflow_type, args).await?;
        Ok(self.handle(execution))
    }

    fn get_workflow(&self, workflow_id: &str, run_id: &str) -> Box<dyn WorkflowRun> {
        self.handle(WorkflowExecution::new(workflow_id, run_id))
    }

    async fn cancel_workflow(
        &self,
        workflow_id: &str,
        run_id: Option<&str>,
        reason: Option<&str>,
    ) -> GreetflowResult<()> {
        let request = RequestCancelWorkflowExecutionRequest {
            namespace: self.namespace.clone(),
            workflow_execution: Some(
                WorkflowExecution::new(workflow_id, run_id.unwrap_or_default()).into(),
            ),
            identity: self.options.identity.clone(),
            reason: reason.unwrap_or_default().to_string(),
            request_id: Uuid::new_v4().to_string(),
        };
        self.service.request_cancel_workflow_execution(request).await?;
        info!(workflow_id, "workflow cancellation requested");
        Ok(())
    }
}

struct WorkflowRunImpl {
    client: WorkflowClient,
    execution: WorkflowExecution,
}

#[async_trait]
impl WorkflowRun for WorkflowRunImpl {
    fn workflow_id(&self) -> &str {
        &self.execution.workflow_id
    }

    fn run_id(&self) -> &str {
        &self.execution.run_id
    }

    async fn get(&self) -> GreetflowResult<Option<Vec<u8>>> {
        loop {
            let request = GetWorkflowExecutionResultRequest {
                namespace: self.client.namespace.clone(),
                workflow_execution: Some(self.execution.clone().into()),
                wait_timeout_ms: duration_to_millis(self.client.options.result_poll_timeout),
            };
            let polled_at = tokio::time::Instant::now();
            let response = self
                .client
                .service
                .get_workflow_execution_result(request)
                .await?;

            match workflow_status_from_pb(response.status()) {
                Some(WorkflowExecutionStatus::Completed) => {
                    return Ok((!response.result.is_empty()).then_some(response.result));
                }
                Some(WorkflowExecutionStatus::Failed) => {
                    let failure = response.failure.map(FailureInfo::from).unwrap_or_default();
                    return Err(GreetflowError::WorkflowExecutionFailed(failure));
                }
                Some(WorkflowExecutionStatus::Canceled) => {
                    return Err(GreetflowError::WorkflowExecutionCancelled);
                }
                Some(WorkflowExecutionStatus::TimedOut) => {
                    return Err(GreetflowError::WorkflowExecutionTimedOut);
                }
                Some(WorkflowExecutionStatus::Running) => {
                    debug!(workflow_id = %self.execution.workflow_id, "workflow still running");
                    if polled_at.elapsed() < self.client.options.result_poll_timeout {
                        tokio::time::sleep(self.client.options.result_poll_backoff).await;
                    }
                }
                None => {
                    warn!(
                        workflow_id = %self.execution.workflow_id,
                        "result poll returned no status"
                    );
                    tokio::time::sleep(self.client.options.result_poll_backoff).await;
                }
            }
        }
    }

    async fn get_with_timeout(&self, timeout: Duration) -> GreetflowResult<Option<Vec<u8>>> {
        tokio::time::timeout(timeout, self.get())
            .await
            .map_err(|_| greetflow_core::TransportError::Timeout(timeout))?
    }
}
