//! Replay state built from a workflow's history.
//!
//! Commands issued by workflow code are correlated with history events by
//! command id. A command whose outcome is already in history resolves
//! immediately; one that was scheduled but has no outcome yet stays pending;
//! anything else is new and becomes a command for the service.

use greetflow_core::{millis_to_datetime, FailureInfo};
use greetflow_proto::generated::{EventType, HistoryEvent};
use greetflow_workflow::commands::{
    CancelTimerCommand, RequestCancelActivityCommand, WorkflowCommand,
};
use greetflow_workflow::context::{CommandSink, WorkflowClock};
use greetflow_workflow::future::{CommandFuture, WorkflowError};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{trace, warn};

#[derive(Debug, Clone, PartialEq)]
enum Outcome {
    ActivityCompleted(Vec<u8>),
    ActivityFailed(FailureInfo),
    ActivityCanceled,
    TimerFired,
    TimerCanceled,
}

#[derive(Debug, Clone)]
struct Resolution {
    outcome: Outcome,
    timestamp_ms: i64,
}

/// What history says about one workflow run
#[derive(Debug, Default)]
pub struct ReplayState {
    /// command id -> activity type
    scheduled_activities: HashMap<String, String>,
    started_timers: HashSet<String>,
    resolutions: HashMap<String, Resolution>,
    cancel_requested: bool,
    /// command ids workflow code has issued during this replay
    requested: HashSet<String>,
    cancels_issued: HashSet<String>,
    new_commands: Vec<WorkflowCommand>,
    nondeterminism: Option<String>,
}

impl ReplayState {
    pub fn from_history(events: &[HistoryEvent]) -> Self {
        let mut state = Self::default();
        for event in events {
            let id = event.command_id.clone();
            let outcome = match event.event_type() {
                EventType::WorkflowExecutionStarted => continue,
                EventType::ActivityTaskScheduled => {
                    state
                        .scheduled_activities
                        .insert(id, event.activity_type.clone());
                    continue;
                }
                EventType::TimerStarted => {
                    state.started_timers.insert(id);
                    continue;
                }
                EventType::WorkflowExecutionCancelRequested => {
                    state.cancel_requested = true;
                    continue;
                }
                EventType::ActivityTaskCompleted => Outcome::ActivityCompleted(event.payload.clone()),
                EventType::ActivityTaskFailed => Outcome::ActivityFailed(
                    event.failure.clone().map(FailureInfo::from).unwrap_or_default(),
                ),
                EventType::ActivityTaskCanceled => Outcome::ActivityCanceled,
                EventType::TimerFired => Outcome::TimerFired,
                EventType::TimerCanceled => Outcome::TimerCanceled,
                EventType::Unspecified => {
                    warn!(event_id = event.event_id, "ignoring history event with unknown type");
                    continue;
                }
            };
            state.resolutions.insert(
                id,
                Resolution {
                    outcome,
                    timestamp_ms: event.timestamp_ms,
                },
            );
        }
        state
    }

    pub fn cancel_requested(&self) -> bool {
        self.cancel_requested
    }

    /// Commands produced since the last call, in issue order.
    pub fn take_new_commands(&mut self) -> Vec<WorkflowCommand> {
        std::mem::take(&mut self.new_commands)
    }

    /// First mismatch between workflow code and history, if any.
    ///
    /// Includes history entries the code never reached, which is only
    /// meaningful once the workflow has been polled.
    pub fn nondeterminism(&self) -> Option<String> {
        if let Some(reason) = &self.nondeterminism {
            return Some(reason.clone());
        }
        let mut unreached: Vec<&String> = self
            .scheduled_activities
            .keys()
            .chain(self.started_timers.iter())
            .filter(|id| !self.requested.contains(*id))
            .collect();
        unreached.sort();
        unreached.first().map(|id| {
            format!("history contains command {id} that workflow code did not issue")
        })
    }

    /// Apply one command from workflow code. `None` means the outcome is not
    /// yet known and the caller should stay pending.
    pub fn apply(
        &mut self,
        command: WorkflowCommand,
        default_task_queue: &str,
        clock: &WorkflowClock,
    ) -> Option<Result<Vec<u8>, WorkflowError>> {
        match command {
            WorkflowCommand::ScheduleActivity(mut cmd) => {
                let id = cmd.activity_id.clone();
                self.requested.insert(id.clone());
                if self.started_timers.contains(&id) {
                    return Some(self.mismatch(format!(
                        "command {id} was a timer in history but now schedules activity '{}'",
                        cmd.activity_type
                    )));
                }
                if let Some(recorded) = self.scheduled_activities.get(&id) {
                    if *recorded != cmd.activity_type {
                        let reason = format!(
                            "command {id} scheduled activity '{recorded}' in history but now schedules '{}'",
                            cmd.activity_type
                        );
                        return Some(self.mismatch(reason));
                    }
                }
                if let Some(resolution) = self.resolutions.get(&id).cloned() {
                    clock.advance_to(millis_to_datetime(resolution.timestamp_ms));
                    return Some(match resolution.outcome {
                        Outcome::ActivityCompleted(payload) => Ok(payload),
                        Outcome::ActivityFailed(failure) => Err(WorkflowError::ActivityFailed(failure)),
                        Outcome::ActivityCanceled => Err(WorkflowError::Cancelled),
                        Outcome::TimerFired | Outcome::TimerCanceled => {
                            self.mismatch(format!("command {id} resolved as a timer in history"))
                        }
                    });
                }
                let scheduled = self.scheduled_activities.contains_key(&id);
                if self.cancel_requested {
                    if scheduled {
                        self.issue_cancel(WorkflowCommand::RequestCancelActivity(
                            RequestCancelActivityCommand { activity_id: id },
                        ));
                    }
                    return Some(Err(WorkflowError::Cancelled));
                }
                if scheduled {
                    trace!(activity_id = %id, "activity scheduled, awaiting result");
                    return None;
                }
                if cmd.options.task_queue.is_empty() {
                    cmd.options.task_queue = default_task_queue.to_string();
                }
                self.new_commands.push(WorkflowCommand::ScheduleActivity(cmd));
                None
            }
            WorkflowCommand::StartTimer(cmd) => {
                let id = cmd.timer_id.clone();
                self.requested.insert(id.clone());
                if self.scheduled_activities.contains_key(&id) {
                    return Some(self.mismatch(format!(
                        "command {id} was an activity in history but now starts a timer"
                    )));
                }
                if let Some(resolution) = self.resolutions.get(&id).cloned() {
                    clock.advance_to(millis_to_datetime(resolution.timestamp_ms));
                    return Some(match resolution.outcome {
                        Outcome::TimerFired => Ok(Vec::new()),
                        Outcome::TimerCanceled => Err(WorkflowError::Cancelled),
                        _ => self.mismatch(format!("command {id} resolved as an activity in history")),
                    });
                }
                let started = self.started_timers.contains(&id);
                if self.cancel_requested {
                    if started {
                        self.issue_cancel(WorkflowCommand::CancelTimer(CancelTimerCommand {
                            timer_id: id,
                        }));
                    }
                    return Some(Err(WorkflowError::Cancelled));
                }
                if !started {
                    self.new_commands.push(WorkflowCommand::StartTimer(cmd));
                }
                None
            }
            command @ (WorkflowCommand::RequestCancelActivity(_)
            | WorkflowCommand::CancelTimer(_)) => {
                let pending = command
                    .command_id()
                    .map(|id| !self.resolutions.contains_key(id))
                    .unwrap_or(false);
                if pending {
                    self.issue_cancel(command);
                }
                Some(Ok(Vec::new()))
            }
            WorkflowCommand::CompleteWorkflow(_)
            | WorkflowCommand::FailWorkflow(_)
            | WorkflowCommand::CancelWorkflow(_) => Some(Err(WorkflowError::Generic(
                "workflow close commands are issued by the worker".to_string(),
            ))),
        }
    }

    fn issue_cancel(&mut self, command: WorkflowCommand) {
        let Some(id) = command.command_id().map(str::to_string) else {
            return;
        };
        if self.cancels_issued.insert(id) {
            self.new_commands.push(command);
        }
    }

    fn mismatch(&mut self, reason: String) -> Result<Vec<u8>, WorkflowError> {
        warn!(%reason, "workflow code diverged from history");
        self.nondeterminism.get_or_insert_with(|| reason.clone());
        Err(WorkflowError::NonDeterministic(reason))
    }
}

/// Command sink that resolves workflow commands from [`ReplayState`]
pub struct ReplayCommandSink {
    state: Arc<Mutex<ReplayState>>,
    clock: WorkflowClock,
    default_task_queue: String,
}

impl ReplayCommandSink {
    pub fn new(
        state: Arc<Mutex<ReplayState>>,
        clock: WorkflowClock,
        default_task_queue: impl Into<String>,
    ) -> Self {
        Self {
            state,
            clock,
            default_task_queue: default_task_queue.into(),
        }
    }
}

impl CommandSink for ReplayCommandSink {
    fn submit(&self, command: WorkflowCommand) -> CommandFuture {
        let resolved = self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .apply(command, &self.default_task_queue, &self.clock);

        match resolved {
            Some(result) => Box::pin(async move { result }),
            None => Box::pin(std::future::pending()),
        }
    }
}
