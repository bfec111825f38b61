//! Hello world greeting workflow.
//!
//! The `hello_world` workflow greets a person with the `greet` activity and,
//! when asked to, waits a second and says goodbye with `farewell`. The
//! `hello-worker` binary hosts both on [`TASK_QUEUE`]; `hello-client` starts
//! an execution and prints its result.

pub mod activities;
pub mod config;
pub mod tracing_setup;
pub mod workflows;

use greetflow_worker::Registry;

/// Task queue the worker listens on and the client starts workflows on
pub const TASK_QUEUE: &str = "hello-world-queue";

/// Register the workflow and both activities.
pub fn register_all(registry: &dyn Registry) {
    workflows::register(registry);
    activities::register(registry);
}
