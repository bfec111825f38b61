//! Workflows hosted by the hello world worker.

pub mod hello_world;

pub use hello_world::*;

use greetflow_worker::{workflow_fn, Registry};

pub const HELLO_WORLD_WORKFLOW: &str = "hello_world";

pub fn register(registry: &dyn Registry) {
    registry.register_workflow(HELLO_WORLD_WORKFLOW, workflow_fn(hello_world));
}
