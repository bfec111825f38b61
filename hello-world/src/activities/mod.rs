//! Activities used by the hello world workflow.

pub mod greet;

pub use greet::*;

use greetflow_worker::{activity_fn, Registry};

pub const GREET_ACTIVITY: &str = "greet";
pub const FAREWELL_ACTIVITY: &str = "farewell";

pub fn register(registry: &dyn Registry) {
    registry.register_activity(GREET_ACTIVITY, activity_fn(greet));
    registry.register_activity(FAREWELL_ACTIVITY, activity_fn(farewell));
}
