//! Workflow authoring SDK for greetflow.
//!
//! Workflow code is an async function over a [`WorkflowContext`]. The
//! context is the only way a workflow reaches the outside world: activity
//! calls, durable timers, deterministic time and cancellation status all go
//! through it, and every effect is expressed as a [`WorkflowCommand`] handed
//! to a [`CommandSink`] supplied by the host (the worker's replay executor or
//! the in-process test environment).

pub mod commands;
pub mod context;
pub mod future;

pub use commands::*;
pub use context::*;
pub use future::*;
