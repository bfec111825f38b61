//! Testing utilities for greetflow workflows and activities.
//!
//! Runs workflows and activities in-process, without a workflow service.

pub mod suite;

pub use suite::*;
