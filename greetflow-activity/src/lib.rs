//! Activity authoring SDK for greetflow.
//!
//! Activities receive an [`ActivityContext`] describing the task being
//! executed and exposing worker shutdown as cooperative cancellation.

pub mod context;

pub use context::*;
pub use greetflow_core::{ActivityInfo, WorkflowExecution};
