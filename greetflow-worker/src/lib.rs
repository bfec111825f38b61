//! greetflow worker implementation.
//!
//! This crate provides the worker for hosting workflow and activity
//! implementations, polling tasks from the workflow service, replaying
//! workflow code against the history each task carries, and executing
//! activities.

pub mod executor;
pub mod handlers;
pub mod pollers;
pub mod registry;
pub mod worker;

pub use registry::*;
pub use worker::*;
