//! Workflow task execution: replaying workflow code against history.

pub mod replay;
pub mod workflow;

pub use replay::ReplayState;
pub use workflow::{WorkflowTaskExecutor, WorkflowTaskOutcome};
