//! Workflow task handler.

use crate::executor::workflow::{command_to_pb, WorkflowTaskExecutor, WorkflowTaskOutcome};
use crate::worker::WorkerError;
use greetflow_proto::generated::{PollWorkflowTaskResponse, RespondWorkflowTaskCompletedRequest};
use greetflow_proto::WorkflowService;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct WorkflowTaskHandler {
    service: Arc<dyn WorkflowService>,
    executor: WorkflowTaskExecutor,
    identity: String,
}

impl WorkflowTaskHandler {
    pub fn new(
        service: Arc<dyn WorkflowService>,
        executor: WorkflowTaskExecutor,
        identity: impl Into<String>,
    ) -> Self {
        Self {
            service,
            executor,
            identity: identity.into(),
        }
    }

    /// Replay the task and report the resulting commands.
    pub async fn handle(&self, task: PollWorkflowTaskResponse) -> Result<(), WorkerError> {
        let commands = match self.executor.execute(&task) {
            WorkflowTaskOutcome::Respond(commands) => commands,
            WorkflowTaskOutcome::Block(reason) => {
                warn!(workflow_type = %task.workflow_type, %reason, "leaving workflow task unanswered");
                return Err(WorkerError::TaskFailed(reason));
            }
        };

        debug!(commands = commands.len(), "responding to workflow task");
        self.service
            .respond_workflow_task_completed(RespondWorkflowTaskCompletedRequest {
                task_token: task.task_token,
                commands: commands.into_iter().map(command_to_pb).collect(),
                identity: self.identity.clone(),
            })
            .await?;
        Ok(())
    }
}
