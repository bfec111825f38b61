//! Client options.

use greetflow_core::default_identity;
use std::time::Duration;

/// Client configuration options
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub identity: String,
    /// Timeout for establishing the gRPC connection
    pub connect_timeout: Duration,
    /// Server-side wait per result long-poll before asking again
    pub result_poll_timeout: Duration,
    /// Pause before re-polling when the service answers early or without a status
    pub result_poll_backoff: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            identity: default_identity("greetflow-client"),
            connect_timeout: Duration::from_secs(10),
            result_poll_timeout: Duration::from_secs(30),
            result_poll_backoff: Duration::from_millis(200),
        }
    }
}

/// Options for starting a workflow
#[derive(Debug, Clone, Default)]
pub struct StartWorkflowOptions {
    /// Caller-chosen workflow id
    pub id: String,
    pub task_queue: String,
    /// Limit on the whole execution; `None` leaves it to the service
    pub execution_timeout: Option<Duration>,
}

impl StartWorkflowOptions {
    pub fn new(id: impl Into<String>, task_queue: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            task_queue: task_queue.into(),
            execution_timeout: None,
        }
    }
}
