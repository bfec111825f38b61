//! Decisions a workflow run emits at yield points.
//!
//! Activity and timer commands carry the run-local command id ("1", "2", ...)
//! that replay uses to match them against recorded history events.

use greetflow_core::{ActivityOptions, FailureInfo};
use std::time::Duration;

/// One decision produced by a workflow task
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowCommand {
    ScheduleActivity(ScheduleActivityCommand),
    RequestCancelActivity(RequestCancelActivityCommand),
    StartTimer(StartTimerCommand),
    CancelTimer(CancelTimerCommand),
    CompleteWorkflow(CompleteWorkflowCommand),
    FailWorkflow(FailWorkflowCommand),
    CancelWorkflow(CancelWorkflowCommand),
}

impl WorkflowCommand {
    /// The per-run command id this command is correlated by, if any.
    pub fn command_id(&self) -> Option<&str> {
        let id = match self {
            Self::ScheduleActivity(cmd) => &cmd.activity_id,
            Self::RequestCancelActivity(cmd) => &cmd.activity_id,
            Self::StartTimer(cmd) => &cmd.timer_id,
            Self::CancelTimer(cmd) => &cmd.timer_id,
            Self::CompleteWorkflow(_) | Self::FailWorkflow(_) | Self::CancelWorkflow(_) => {
                return None
            }
        };
        Some(id.as_str())
    }

    /// Whether this command closes the run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::CompleteWorkflow(_) | Self::FailWorkflow(_) | Self::CancelWorkflow(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleActivityCommand {
    pub activity_id: String,
    pub activity_type: String,
    pub args: Option<Vec<u8>>,
    pub options: ActivityOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestCancelActivityCommand {
    pub activity_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTimerCommand {
    pub timer_id: String,
    /// Fire delay measured on the workflow clock
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelTimerCommand {
    pub timer_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompleteWorkflowCommand {
    pub result: Option<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailWorkflowCommand {
    pub failure: FailureInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelWorkflowCommand {
    pub details: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_commands_have_no_command_id() {
        let close = WorkflowCommand::CompleteWorkflow(CompleteWorkflowCommand { result: None });
        assert!(close.is_terminal());
        assert_eq!(close.command_id(), None);

        let timer = WorkflowCommand::StartTimer(StartTimerCommand {
            timer_id: "2".to_string(),
            duration: Duration::from_secs(1),
        });
        assert!(!timer.is_terminal());
        assert_eq!(timer.command_id(), Some("2"));
    }
}
