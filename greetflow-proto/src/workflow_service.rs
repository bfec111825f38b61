//! Workflow service interface.
//!
//! Workers and clients talk to the orchestration service only through this
//! trait. The gRPC implementation lives in `greetflow-client`; tests supply
//! in-memory fakes.

use async_trait::async_trait;
use greetflow_core::TransportError;

use crate::generated::*;

#[async_trait]
pub trait WorkflowService: Send + Sync {
    async fn start_workflow_execution(
        &self,
        request: StartWorkflowExecutionRequest,
    ) -> Result<StartWorkflowExecutionResponse, TransportError>;

    /// Long-poll; returns `Running` status when the wait timeout elapses first.
    async fn get_workflow_execution_result(
        &self,
        request: GetWorkflowExecutionResultRequest,
    ) -> Result<GetWorkflowExecutionResultResponse, TransportError>;

    async fn request_cancel_workflow_execution(
        &self,
        request: RequestCancelWorkflowExecutionRequest,
    ) -> Result<RequestCancelWorkflowExecutionResponse, TransportError>;

    /// Long-poll; an empty `task_token` in the response means no work.
    async fn poll_workflow_task(
        &self,
        request: PollWorkflowTaskRequest,
    ) -> Result<PollWorkflowTaskResponse, TransportError>;

    async fn respond_workflow_task_completed(
        &self,
        request: RespondWorkflowTaskCompletedRequest,
    ) -> Result<RespondWorkflowTaskCompletedResponse, TransportError>;

    /// Long-poll; an empty `task_token` in the response means no work.
    async fn poll_activity_task(
        &self,
        request: PollActivityTaskRequest,
    ) -> Result<PollActivityTaskResponse, TransportError>;

    async fn respond_activity_task_completed(
        &self,
        request: RespondActivityTaskCompletedRequest,
    ) -> Result<RespondActivityTaskCompletedResponse, TransportError>;

    async fn respond_activity_task_failed(
        &self,
        request: RespondActivityTaskFailedRequest,
    ) -> Result<RespondActivityTaskFailedResponse, TransportError>;
}
