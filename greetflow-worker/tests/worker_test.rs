//! Worker tests against a scripted in-memory workflow service.

use async_trait::async_trait;
use greetflow_activity::ActivityContext;
use greetflow_core::{ActivityOptions, TransportError};
use greetflow_proto::generated::*;
use greetflow_proto::WorkflowService;
use greetflow_worker::{
    activity_fn, workflow_fn, ActivityError, GreetflowWorker, Registry, WorkerError,
    WorkerOptions, WorkflowRegistry,
};
use greetflow_workflow::{WorkflowContext, WorkflowError};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug)]
enum Recorded {
    WorkflowTaskCompleted(RespondWorkflowTaskCompletedRequest),
    ActivityCompleted(RespondActivityTaskCompletedRequest),
    ActivityFailed(RespondActivityTaskFailedRequest),
}

/// Serves each scripted task once, then empty polls.
struct ScriptedService {
    workflow_tasks: Mutex<VecDeque<PollWorkflowTaskResponse>>,
    activity_tasks: Mutex<VecDeque<PollActivityTaskResponse>>,
    recorded: mpsc::UnboundedSender<Recorded>,
}

impl ScriptedService {
    fn new(
        workflow_tasks: Vec<PollWorkflowTaskResponse>,
        activity_tasks: Vec<PollActivityTaskResponse>,
    ) -> (Arc<Self>, mpsc::UnboundedReceiver<Recorded>) {
        let (recorded, rx) = mpsc::unbounded_channel();
        let service = Arc::new(Self {
            workflow_tasks: Mutex::new(workflow_tasks.into()),
            activity_tasks: Mutex::new(activity_tasks.into()),
            recorded,
        });
        (service, rx)
    }

    fn record(&self, entry: Recorded) {
        let _ = self.recorded.send(entry);
    }
}

async fn idle_poll() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

#[async_trait]
impl WorkflowService for ScriptedService {
    async fn start_workflow_execution(
        &self,
        _request: StartWorkflowExecutionRequest,
    ) -> Result<StartWorkflowExecutionResponse, TransportError> {
        Err(TransportError::status(tonic::Code::Unimplemented, "not scripted"))
    }

    async fn get_workflow_execution_result(
        &self,
        _request: GetWorkflowExecutionResultRequest,
    ) -> Result<GetWorkflowExecutionResultResponse, TransportError> {
        Err(TransportError::status(tonic::Code::Unimplemented, "not scripted"))
    }

    async fn request_cancel_workflow_execution(
        &self,
        _request: RequestCancelWorkflowExecutionRequest,
    ) -> Result<RequestCancelWorkflowExecutionResponse, TransportError> {
        Err(TransportError::status(tonic::Code::Unimplemented, "not scripted"))
    }

    async fn poll_workflow_task(
        &self,
        _request: PollWorkflowTaskRequest,
    ) -> Result<PollWorkflowTaskResponse, TransportError> {
        let next = self.workflow_tasks.lock().unwrap().pop_front();
        match next {
            Some(task) => Ok(task),
            None => {
                idle_poll().await;
                Ok(PollWorkflowTaskResponse::default())
            }
        }
    }

    async fn respond_workflow_task_completed(
        &self,
        request: RespondWorkflowTaskCompletedRequest,
    ) -> Result<RespondWorkflowTaskCompletedResponse, TransportError> {
        self.record(Recorded::WorkflowTaskCompleted(request));
        Ok(RespondWorkflowTaskCompletedResponse {})
    }

    async fn poll_activity_task(
        &self,
        _request: PollActivityTaskRequest,
    ) -> Result<PollActivityTaskResponse, TransportError> {
        let next = self.activity_tasks.lock().unwrap().pop_front();
        match next {
            Some(task) => Ok(task),
            None => {
                idle_poll().await;
                Ok(PollActivityTaskResponse::default())
            }
        }
    }

    async fn respond_activity_task_completed(
        &self,
        request: RespondActivityTaskCompletedRequest,
    ) -> Result<RespondActivityTaskCompletedResponse, TransportError> {
        self.record(Recorded::ActivityCompleted(request));
        Ok(RespondActivityTaskCompletedResponse {})
    }

    async fn respond_activity_task_failed(
        &self,
        request: RespondActivityTaskFailedRequest,
    ) -> Result<RespondActivityTaskFailedResponse, TransportError> {
        self.record(Recorded::ActivityFailed(request));
        Ok(RespondActivityTaskFailedResponse {})
    }
}

async fn shout(_ctx: ActivityContext, name: String) -> Result<String, ActivityError> {
    if name.is_empty() {
        return Err(ActivityError::non_retryable("empty name"));
    }
    Ok(format!("{}!", name.to_uppercase()))
}

async fn shout_workflow(ctx: WorkflowContext, name: String) -> Result<String, WorkflowError> {
    ctx.call_activity("shout", &name, ActivityOptions::default())
        .await
}

/// Stops early when the worker shuts down, the way `greet` does.
async fn patient(ctx: ActivityContext, name: String) -> Result<String, ActivityError> {
    tokio::select! {
        _ = tokio::time::sleep(Duration::from_secs(3600)) => Ok(name),
        _ = ctx.cancelled() => Err(ActivityError::Cancelled),
    }
}

async fn slow(_ctx: ActivityContext, name: String) -> Result<String, ActivityError> {
    tokio::time::sleep(Duration::from_millis(200)).await;
    Ok(name)
}

/// Ignores the stop signal entirely.
async fn stubborn(_ctx: ActivityContext, name: String) -> Result<String, ActivityError> {
    tokio::time::sleep(Duration::from_secs(3600)).await;
    Ok(name)
}

fn registry() -> Arc<WorkflowRegistry> {
    let registry = Arc::new(WorkflowRegistry::new());
    registry.register_activity("shout", activity_fn(shout));
    registry.register_activity("patient", activity_fn(patient));
    registry.register_activity("slow", activity_fn(slow));
    registry.register_activity("stubborn", activity_fn(stubborn));
    registry.register_workflow("shout_workflow", workflow_fn(shout_workflow));
    registry
}

fn activity_task(token: &[u8], input: &[u8]) -> PollActivityTaskResponse {
    typed_activity_task("shout", token, input)
}

fn typed_activity_task(
    activity_type: &str,
    token: &[u8],
    input: &[u8],
) -> PollActivityTaskResponse {
    PollActivityTaskResponse {
        task_token: token.to_vec(),
        workflow_execution: Some(WorkflowExecution {
            workflow_id: "wf-1".to_string(),
            run_id: "run-1".to_string(),
        }),
        activity_id: "1".to_string(),
        activity_type: activity_type.to_string(),
        input: input.to_vec(),
        attempt: 1,
        scheduled_time_ms: 0,
        start_to_close_timeout_ms: 5_000,
    }
}

fn worker(service: Arc<ScriptedService>) -> GreetflowWorker {
    let options = WorkerOptions {
        max_concurrent_workflow_task_pollers: 1,
        max_concurrent_activity_task_pollers: 1,
        worker_stop_timeout: Duration::from_secs(1),
        ..Default::default()
    };
    GreetflowWorker::new(service, "default", "queue", options, registry())
}

async fn next_recorded(rx: &mut mpsc::UnboundedReceiver<Recorded>) -> Recorded {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for a response")
        .expect("service dropped")
}

#[tokio::test]
async fn activity_task_is_executed_and_completed() {
    let (service, mut rx) = ScriptedService::new(vec![], vec![activity_task(b"t1", b"\"bob\"")]);
    let mut worker = worker(service);
    worker.start().unwrap();

    match next_recorded(&mut rx).await {
        Recorded::ActivityCompleted(response) => {
            assert_eq!(response.task_token, b"t1".to_vec());
            assert_eq!(response.result, b"\"BOB!\"".to_vec());
        }
        other => panic!("unexpected response: {other:?}"),
    }
    worker.stop().await;
}

#[tokio::test]
async fn non_retryable_activity_failure_is_flagged() {
    let (service, mut rx) = ScriptedService::new(vec![], vec![activity_task(b"t2", b"\"\"")]);
    let mut worker = worker(service);
    worker.start().unwrap();

    match next_recorded(&mut rx).await {
        Recorded::ActivityFailed(response) => {
            let failure = response.failure.unwrap();
            assert!(failure.non_retryable);
            assert_eq!(failure.failure_type, "NonRetryable");
        }
        other => panic!("unexpected response: {other:?}"),
    }
    worker.stop().await;
}

#[tokio::test]
async fn workflow_task_replays_and_schedules_activity() {
    let mut started = HistoryEvent::default();
    started.set_event_type(EventType::WorkflowExecutionStarted);
    let task = PollWorkflowTaskResponse {
        task_token: b"wt1".to_vec(),
        workflow_execution: Some(WorkflowExecution {
            workflow_id: "wf-1".to_string(),
            run_id: "run-1".to_string(),
        }),
        workflow_type: "shout_workflow".to_string(),
        input: b"\"bob\"".to_vec(),
        history: vec![started],
        attempt: 1,
        start_time_ms: 1_000,
    };
    let (service, mut rx) = ScriptedService::new(vec![task], vec![]);
    let mut worker = worker(service);
    worker.start().unwrap();

    match next_recorded(&mut rx).await {
        Recorded::WorkflowTaskCompleted(response) => {
            assert_eq!(response.task_token, b"wt1".to_vec());
            assert_eq!(response.commands.len(), 1);
            let command = &response.commands[0];
            assert_eq!(command.command_type(), CommandType::ScheduleActivityTask);
            assert_eq!(command.activity_type, "shout");
            assert_eq!(command.task_queue, "queue");
            assert_eq!(command.payload, b"\"bob\"".to_vec());
        }
        other => panic!("unexpected response: {other:?}"),
    }
    worker.stop().await;
}

#[tokio::test]
async fn starting_twice_is_rejected() {
    let (service, _rx) = ScriptedService::new(vec![], vec![]);
    let mut worker = worker(service);
    worker.start().unwrap();
    assert!(matches!(worker.start(), Err(WorkerError::AlreadyStarted)));
    worker.stop().await;
}

#[tokio::test]
async fn zero_activity_slots_is_invalid() {
    let (service, _rx) = ScriptedService::new(vec![], vec![]);
    let options = WorkerOptions {
        max_concurrent_activity_execution_size: 0,
        ..Default::default()
    };
    let mut worker = GreetflowWorker::new(service, "default", "queue", options, registry());
    assert!(matches!(
        worker.start(),
        Err(WorkerError::InvalidConfiguration(_))
    ));
}

/// Lets the paused clock run until the poller has dispatched its task.
async fn let_activity_start() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test(start_paused = true)]
async fn activity_interrupted_by_stop_stays_retryable() {
    let (service, mut rx) =
        ScriptedService::new(vec![], vec![typed_activity_task("patient", b"t3", b"\"ada\"")]);
    let mut worker = worker(service);
    worker.start().unwrap();
    let_activity_start().await;

    worker.stop().await;

    match rx.try_recv() {
        Ok(Recorded::ActivityFailed(response)) => {
            assert_eq!(response.task_token, b"t3".to_vec());
            let failure = response.failure.unwrap();
            assert!(!failure.non_retryable);
            assert_eq!(failure.failure_type, "WorkerShutdown");
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn stop_waits_for_running_activity() {
    let (service, mut rx) =
        ScriptedService::new(vec![], vec![typed_activity_task("slow", b"t4", b"\"ada\"")]);
    let mut worker = worker(service);
    worker.start().unwrap();
    let_activity_start().await;
    assert!(rx.try_recv().is_err());

    let stopping = tokio::time::Instant::now();
    worker.stop().await;
    assert!(stopping.elapsed() < Duration::from_secs(1));

    match rx.try_recv() {
        Ok(Recorded::ActivityCompleted(response)) => {
            assert_eq!(response.task_token, b"t4".to_vec());
            assert_eq!(response.result, b"\"ada\"".to_vec());
        }
        other => panic!("unexpected response: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn stop_gives_up_after_timeout() {
    let (service, mut rx) =
        ScriptedService::new(vec![], vec![typed_activity_task("stubborn", b"t5", b"\"ada\"")]);
    let mut worker = worker(service);
    worker.start().unwrap();
    let_activity_start().await;

    let stopping = tokio::time::Instant::now();
    worker.stop().await;
    let waited = stopping.elapsed();
    assert!(waited >= Duration::from_secs(1));
    // Well before the activity's own start-to-close timeout of 5s.
    assert!(waited < Duration::from_secs(5));
    assert!(rx.try_recv().is_err());
}
