//! Client tests against an in-memory workflow service.

use async_trait::async_trait;
use greetflow_client::{Client, ClientOptions, StartWorkflowOptions, WorkflowClient};
use greetflow_core::{GreetflowError, TransportError};
use greetflow_proto::generated::*;
use greetflow_proto::WorkflowService;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct FakeService {
    started: Mutex<Vec<StartWorkflowExecutionRequest>>,
    cancelled: Mutex<Vec<RequestCancelWorkflowExecutionRequest>>,
    results: Mutex<VecDeque<GetWorkflowExecutionResultResponse>>,
    result_polls: Mutex<usize>,
}

impl FakeService {
    fn with_results(results: Vec<GetWorkflowExecutionResultResponse>) -> Arc<Self> {
        Arc::new(Self {
            results: Mutex::new(results.into()),
            ..Default::default()
        })
    }
}

fn unscripted() -> TransportError {
    TransportError::status(tonic::Code::Unimplemented, "not scripted")
}

#[async_trait]
impl WorkflowService for FakeService {
    async fn start_workflow_execution(
        &self,
        request: StartWorkflowExecutionRequest,
    ) -> Result<StartWorkflowExecutionResponse, TransportError> {
        self.started.lock().unwrap().push(request);
        Ok(StartWorkflowExecutionResponse {
            run_id: "run-1".to_string(),
        })
    }

    async fn get_workflow_execution_result(
        &self,
        _request: GetWorkflowExecutionResultRequest,
    ) -> Result<GetWorkflowExecutionResultResponse, TransportError> {
        *self.result_polls.lock().unwrap() += 1;
        let next = self.results.lock().unwrap().pop_front();
        next.ok_or_else(|| TransportError::status(tonic::Code::NotFound, "no such run"))
    }

    async fn request_cancel_workflow_execution(
        &self,
        request: RequestCancelWorkflowExecutionRequest,
    ) -> Result<RequestCancelWorkflowExecutionResponse, TransportError> {
        self.cancelled.lock().unwrap().push(request);
        Ok(RequestCancelWorkflowExecutionResponse {})
    }

    async fn poll_workflow_task(
        &self,
        _request: PollWorkflowTaskRequest,
    ) -> Result<PollWorkflowTaskResponse, TransportError> {
        Err(unscripted())
    }

    async fn respond_workflow_task_completed(
        &self,
        _request: RespondWorkflowTaskCompletedRequest,
    ) -> Result<RespondWorkflowTaskCompletedResponse, TransportError> {
        Err(unscripted())
    }

    async fn poll_activity_task(
        &self,
        _request: PollActivityTaskRequest,
    ) -> Result<PollActivityTaskResponse, TransportError> {
        Err(unscripted())
    }

    async fn respond_activity_task_completed(
        &self,
        _request: RespondActivityTaskCompletedRequest,
    ) -> Result<RespondActivityTaskCompletedResponse, TransportError> {
        Err(unscripted())
    }

    async fn respond_activity_task_failed(
        &self,
        _request: RespondActivityTaskFailedRequest,
    ) -> Result<RespondActivityTaskFailedResponse, TransportError> {
        Err(unscripted())
    }
}

fn status(status: WorkflowExecutionStatus) -> GetWorkflowExecutionResultResponse {
    let mut response = GetWorkflowExecutionResultResponse::default();
    response.set_status(status);
    response
}

fn client(service: Arc<FakeService>) -> WorkflowClient {
    let options = ClientOptions {
        identity: "test-client".to_string(),
        ..Default::default()
    };
    WorkflowClient::new(service, "default", options)
}

#[tokio::test]
async fn start_sends_namespace_queue_and_request_id() {
    let service = FakeService::with_results(vec![]);
    let client = client(service.clone());

    let execution = client
        .start_workflow(
            StartWorkflowOptions::new("hello-world-1", "hello-world-queue"),
            "hello_world",
            Some(br#"{"name":"Ada"}"#),
        )
        .await
        .unwrap();
    assert_eq!(execution.workflow_id, "hello-world-1");
    assert_eq!(execution.run_id, "run-1");

    let started = service.started.lock().unwrap();
    let request = &started[0];
    assert_eq!(request.namespace, "default");
    assert_eq!(request.task_queue, "hello-world-queue");
    assert_eq!(request.workflow_type, "hello_world");
    assert_eq!(request.identity, "test-client");
    assert_eq!(request.input, br#"{"name":"Ada"}"#.to_vec());
    assert!(!request.request_id.is_empty());
}

#[tokio::test]
async fn start_requires_workflow_id() {
    let client = client(FakeService::with_results(vec![]));
    let err = client
        .start_workflow(StartWorkflowOptions::new("", "queue"), "hello_world", None)
        .await
        .unwrap_err();
    assert!(matches!(err, GreetflowError::InvalidArgument(_)));
}

#[tokio::test(start_paused = true)]
async fn result_keeps_polling_while_running() {
    let mut completed = status(WorkflowExecutionStatus::Completed);
    completed.result = b"\"done\"".to_vec();
    let service = FakeService::with_results(vec![
        status(WorkflowExecutionStatus::Running),
        status(WorkflowExecutionStatus::Running),
        completed,
    ]);
    let client = client(service.clone());

    let run = client
        .execute_workflow(StartWorkflowOptions::new("wf", "queue"), "hello_world", None)
        .await
        .unwrap();
    assert_eq!(run.run_id(), "run-1");
    assert_eq!(run.get().await.unwrap(), Some(b"\"done\"".to_vec()));
    assert_eq!(*service.result_polls.lock().unwrap(), 3);
}

#[tokio::test(start_paused = true)]
async fn early_or_statusless_answers_back_off() {
    let mut completed = status(WorkflowExecutionStatus::Completed);
    completed.result = b"\"done\"".to_vec();
    let service = FakeService::with_results(vec![
        status(WorkflowExecutionStatus::Unspecified),
        status(WorkflowExecutionStatus::Running),
        completed,
    ]);
    let client = client(service.clone());

    let started = tokio::time::Instant::now();
    let result = client.get_workflow("wf", "run-1").get().await.unwrap();
    assert_eq!(result, Some(b"\"done\"".to_vec()));
    assert_eq!(*service.result_polls.lock().unwrap(), 3);
    let backoff = ClientOptions::default().result_poll_backoff;
    assert!(started.elapsed() >= backoff * 2);
}

#[tokio::test]
async fn failed_execution_carries_failure() {
    let mut failed = status(WorkflowExecutionStatus::Failed);
    failed.failure = Some(Failure {
        message: "greet exploded".to_string(),
        failure_type: "ActivityFailed".to_string(),
        non_retryable: true,
    });
    let client = client(FakeService::with_results(vec![failed]));

    let err = client.get_workflow("wf", "run-1").get().await.unwrap_err();
    match err {
        GreetflowError::WorkflowExecutionFailed(failure) => {
            assert_eq!(failure.message, "greet exploded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn cancelled_execution_is_reported() {
    let client = client(FakeService::with_results(vec![status(
        WorkflowExecutionStatus::Canceled,
    )]));
    let err = client.get_workflow("wf", "").get().await.unwrap_err();
    assert!(matches!(err, GreetflowError::WorkflowExecutionCancelled));
}

#[tokio::test]
async fn transport_errors_surface_from_result() {
    let client = client(FakeService::with_results(vec![]));
    let err = client
        .get_workflow("wf", "run-1")
        .get_with_timeout(Duration::from_secs(1))
        .await
        .unwrap_err();
    assert!(matches!(err, GreetflowError::Transport(_)));
}

#[tokio::test]
async fn cancel_sends_execution_and_reason() {
    let service = FakeService::with_results(vec![]);
    let client = client(service.clone());
    client
        .cancel_workflow("wf", Some("run-1"), Some("user request"))
        .await
        .unwrap();

    let cancelled = service.cancelled.lock().unwrap();
    let request = &cancelled[0];
    assert_eq!(request.reason, "user request");
    assert_eq!(
        request.workflow_execution.as_ref().map(|e| e.run_id.as_str()),
        Some("run-1")
    );
}
