//! Workflow task executor.
//!
//! Each workflow task carries the run's full history. The executor builds a
//! [`ReplayState`] from it, runs the registered workflow function against a
//! [`ReplayCommandSink`] and polls it once: replayed steps resolve
//! immediately, so a single poll drives the workflow to its first
//! unresolved step (or to completion).

use crate::executor::replay::{ReplayCommandSink, ReplayState};
use crate::registry::Registry;
use crate::worker::NonDeterministicWorkflowPolicy;
use greetflow_core::{duration_to_millis, millis_to_datetime, WorkflowExecution, WorkflowInfo};
use greetflow_proto::generated::{self as pb, CommandType, PollWorkflowTaskResponse};
use greetflow_workflow::commands::{
    CancelWorkflowCommand, CompleteWorkflowCommand, FailWorkflowCommand, WorkflowCommand,
};
use greetflow_workflow::context::{WorkflowClock, WorkflowContext};
use greetflow_workflow::future::WorkflowError;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use tracing::{debug, error, info};

/// Result of executing one workflow task
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowTaskOutcome {
    /// Commands to send back with `RespondWorkflowTaskCompleted`
    Respond(Vec<WorkflowCommand>),
    /// Leave the task unanswered so the service retries it
    Block(String),
}

pub struct WorkflowTaskExecutor {
    registry: Arc<dyn Registry>,
    namespace: String,
    task_queue: String,
    non_deterministic_policy: NonDeterministicWorkflowPolicy,
}

impl WorkflowTaskExecutor {
    pub fn new(
        registry: Arc<dyn Registry>,
        namespace: impl Into<String>,
        task_queue: impl Into<String>,
        non_deterministic_policy: NonDeterministicWorkflowPolicy,
    ) -> Self {
        Self {
            registry,
            namespace: namespace.into(),
            task_queue: task_queue.into(),
            non_deterministic_policy,
        }
    }

    pub fn execute(&self, task: &PollWorkflowTaskResponse) -> WorkflowTaskOutcome {
        let execution: WorkflowExecution = task
            .workflow_execution
            .clone()
            .map(Into::into)
            .unwrap_or_else(|| WorkflowExecution::new("", ""));

        let Some(workflow) = self.registry.get_workflow(&task.workflow_type) else {
            error!(
                workflow_type = %task.workflow_type,
                workflow_id = %execution.workflow_id,
                "workflow type not registered on this worker"
            );
            return WorkflowTaskOutcome::Block(format!(
                "workflow type '{}' not registered",
                task.workflow_type
            ));
        };

        debug!(
            workflow_id = %execution.workflow_id,
            run_id = %execution.run_id,
            events = task.history.len(),
            "replaying workflow task"
        );

        let info = WorkflowInfo {
            workflow_execution: execution.clone(),
            workflow_type: task.workflow_type.clone(),
            namespace: self.namespace.clone(),
            task_queue: self.task_queue.clone(),
            start_time: millis_to_datetime(task.start_time_ms),
            attempt: task.attempt,
        };
        let clock = WorkflowClock::new(info.start_time);
        let state = Arc::new(Mutex::new(ReplayState::from_history(&task.history)));
        let sink = Arc::new(ReplayCommandSink::new(
            state.clone(),
            clock.clone(),
            self.task_queue.clone(),
        ));
        let ctx = WorkflowContext::builder(info, sink).clock(clock).build();

        let input = (!task.input.is_empty()).then(|| task.input.clone());
        let mut workflow_future = workflow.execute(ctx, input);

        let waker = futures::task::noop_waker();
        let mut cx = Context::from_waker(&waker);
        let polled = workflow_future.as_mut().poll(&mut cx);
        drop(workflow_future);

        let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(reason) = state.nondeterminism() {
            error!(workflow_id = %execution.workflow_id, %reason, "non-deterministic workflow");
            return match self.non_deterministic_policy {
                NonDeterministicWorkflowPolicy::BlockWorkflow => WorkflowTaskOutcome::Block(reason),
                NonDeterministicWorkflowPolicy::FailWorkflow => {
                    let failure = WorkflowError::NonDeterministic(reason).to_failure();
                    WorkflowTaskOutcome::Respond(vec![WorkflowCommand::FailWorkflow(
                        FailWorkflowCommand { failure },
                    )])
                }
            };
        }

        let mut commands = state.take_new_commands();
        match polled {
            Poll::Ready(Ok(result)) => {
                info!(workflow_id = %execution.workflow_id, "workflow completed");
                commands.push(WorkflowCommand::CompleteWorkflow(CompleteWorkflowCommand {
                    result: Some(result),
                }));
            }
            Poll::Ready(Err(WorkflowError::Cancelled)) if state.cancel_requested() => {
                info!(workflow_id = %execution.workflow_id, "workflow cancelled");
                commands.push(WorkflowCommand::CancelWorkflow(CancelWorkflowCommand {
                    details: None,
                }));
            }
            Poll::Ready(Err(e)) => {
                info!(workflow_id = %execution.workflow_id, error = %e, "workflow failed");
                commands.push(WorkflowCommand::FailWorkflow(FailWorkflowCommand {
                    failure: e.to_failure(),
                }));
            }
            Poll::Pending => {
                debug!(
                    workflow_id = %execution.workflow_id,
                    commands = commands.len(),
                    "workflow blocked on pending commands"
                );
            }
        }
        WorkflowTaskOutcome::Respond(commands)
    }
}

/// Convert a workflow command to its wire form.
pub fn command_to_pb(command: WorkflowCommand) -> pb::Command {
    let mut wire = pb::Command::default();
    match command {
        WorkflowCommand::ScheduleActivity(cmd) => {
            wire.set_command_type(CommandType::ScheduleActivityTask);
            wire.command_id = cmd.activity_id;
            wire.activity_type = cmd.activity_type;
            wire.task_queue = cmd.options.task_queue;
            wire.payload = cmd.args.unwrap_or_default();
            wire.schedule_to_close_timeout_ms =
                duration_to_millis(cmd.options.schedule_to_close_timeout);
            wire.start_to_close_timeout_ms = duration_to_millis(cmd.options.start_to_close_timeout);
            wire.retry_policy = cmd.options.retry_policy.map(Into::into);
        }
        WorkflowCommand::RequestCancelActivity(cmd) => {
            wire.set_command_type(CommandType::RequestCancelActivityTask);
            wire.command_id = cmd.activity_id;
        }
        WorkflowCommand::StartTimer(cmd) => {
            wire.set_command_type(CommandType::StartTimer);
            wire.command_id = cmd.timer_id;
            wire.timer_duration_ms = duration_to_millis(cmd.duration);
        }
        WorkflowCommand::CancelTimer(cmd) => {
            wire.set_command_type(CommandType::CancelTimer);
            wire.command_id = cmd.timer_id;
        }
        WorkflowCommand::CompleteWorkflow(cmd) => {
            wire.set_command_type(CommandType::CompleteWorkflowExecution);
            wire.payload = cmd.result.unwrap_or_default();
        }
        WorkflowCommand::FailWorkflow(cmd) => {
            wire.set_command_type(CommandType::FailWorkflowExecution);
            wire.failure = Some(cmd.failure.into());
        }
        WorkflowCommand::CancelWorkflow(cmd) => {
            wire.set_command_type(CommandType::CancelWorkflowExecution);
            wire.payload = cmd.details.unwrap_or_default();
        }
    }
    wire
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{workflow_fn, WorkflowRegistry};
    use greetflow_core::{ActivityOptions, RetryPolicy};
    use greetflow_proto::generated::{EventType, HistoryEvent};
    use greetflow_workflow::commands::ScheduleActivityCommand;
    use std::time::Duration;

    async fn echo_twice(ctx: WorkflowContext, name: String) -> Result<String, WorkflowError> {
        let first: String = ctx.call_activity("echo", &name, ActivityOptions::default()).await?;
        ctx.sleep(Duration::from_secs(1)).await?;
        let second: String = ctx.call_activity("echo", &first, ActivityOptions::default()).await?;
        Ok(second)
    }

    fn executor() -> WorkflowTaskExecutor {
        let registry = Arc::new(WorkflowRegistry::new());
        registry.register_workflow("echo_twice", workflow_fn(echo_twice));
        WorkflowTaskExecutor::new(
            registry,
            "default",
            "queue",
            NonDeterministicWorkflowPolicy::BlockWorkflow,
        )
    }

    fn event(event_type: EventType, id: &str) -> HistoryEvent {
        let mut event = HistoryEvent {
            command_id: id.to_string(),
            ..Default::default()
        };
        event.set_event_type(event_type);
        event
    }

    fn task(history: Vec<HistoryEvent>) -> PollWorkflowTaskResponse {
        PollWorkflowTaskResponse {
            task_token: b"token".to_vec(),
            workflow_execution: Some(pb::WorkflowExecution {
                workflow_id: "wf-1".to_string(),
                run_id: "run-1".to_string(),
            }),
            workflow_type: "echo_twice".to_string(),
            input: b"\"hey\"".to_vec(),
            history,
            attempt: 1,
            start_time_ms: 1_000,
        }
    }

    #[test]
    fn first_task_schedules_first_activity() {
        let outcome = executor().execute(&task(vec![event(
            EventType::WorkflowExecutionStarted,
            "",
        )]));
        match outcome {
            WorkflowTaskOutcome::Respond(commands) => {
                assert_eq!(commands.len(), 1);
                assert_eq!(commands[0].command_id(), Some("1"));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn full_history_completes() {
        let mut first = event(EventType::ActivityTaskCompleted, "1");
        first.payload = b"\"hey\"".to_vec();
        let mut second = event(EventType::ActivityTaskCompleted, "3");
        second.payload = b"\"hey!\"".to_vec();
        let history = vec![
            event(EventType::WorkflowExecutionStarted, ""),
            HistoryEvent {
                activity_type: "echo".to_string(),
                ..event(EventType::ActivityTaskScheduled, "1")
            },
            first,
            event(EventType::TimerStarted, "2"),
            event(EventType::TimerFired, "2"),
            HistoryEvent {
                activity_type: "echo".to_string(),
                ..event(EventType::ActivityTaskScheduled, "3")
            },
            second,
        ];

        let outcome = executor().execute(&task(history));
        assert_eq!(
            outcome,
            WorkflowTaskOutcome::Respond(vec![WorkflowCommand::CompleteWorkflow(
                CompleteWorkflowCommand {
                    result: Some(b"\"hey!\"".to_vec())
                }
            )])
        );
    }

    #[test]
    fn unknown_workflow_type_blocks() {
        let mut unknown = task(vec![]);
        unknown.workflow_type = "nope".to_string();
        assert!(matches!(
            executor().execute(&unknown),
            WorkflowTaskOutcome::Block(_)
        ));
    }

    #[test]
    fn schedule_command_carries_options_on_the_wire() {
        let wire = command_to_pb(WorkflowCommand::ScheduleActivity(ScheduleActivityCommand {
            activity_id: "1".to_string(),
            activity_type: "greet".to_string(),
            args: Some(b"{}".to_vec()),
            options: ActivityOptions {
                task_queue: "queue".to_string(),
                start_to_close_timeout: Duration::from_secs(60),
                retry_policy: Some(RetryPolicy {
                    maximum_attempts: 3,
                    ..Default::default()
                }),
                ..Default::default()
            },
        }));
        assert_eq!(wire.command_type(), CommandType::ScheduleActivityTask);
        assert_eq!(wire.start_to_close_timeout_ms, 60_000);
        assert_eq!(wire.retry_policy.map(|p| p.maximum_attempts), Some(3));
    }
}
