//! Task handlers: turn a polled task into a response to the service.

pub mod activity;
pub mod workflow;

pub use activity::ActivityTaskHandler;
pub use workflow::WorkflowTaskHandler;
