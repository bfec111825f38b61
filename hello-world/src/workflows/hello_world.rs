//! The hello world workflow: greet, then optionally wait and say goodbye.
//!
//! Workflow code is replayed from history, so it only reaches time and the
//! activities through [`WorkflowContext`].

use crate::activities::{GreetInput, GreetOutput, FAREWELL_ACTIVITY, GREET_ACTIVITY};
use greetflow_core::{ActivityOptions, RetryPolicy};
use greetflow_workflow::{WorkflowContext, WorkflowError};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Pause between the greeting and the farewell
pub const FAREWELL_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelloWorldInput {
    pub name: String,
    #[serde(default)]
    pub include_goodbye: bool,
}

impl HelloWorldInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            include_goodbye: false,
        }
    }

    pub fn with_goodbye(mut self) -> Self {
        self.include_goodbye = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelloWorldOutput {
    pub greeting_result: GreetOutput,
    /// Present only when a goodbye was requested and `farewell` completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farewell_result: Option<GreetOutput>,
    #[serde(alias = "workflowCompleted")]
    pub completed: bool,
}

/// Options for both activities: one minute per attempt, three attempts
/// starting one second apart and doubling.
pub fn activity_options(task_queue: &str) -> ActivityOptions {
    ActivityOptions {
        task_queue: task_queue.to_string(),
        start_to_close_timeout: Duration::from_secs(60),
        retry_policy: Some(RetryPolicy {
            initial_interval: Duration::from_secs(1),
            backoff_coefficient: 2.0,
            maximum_attempts: 3,
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub async fn hello_world(
    ctx: WorkflowContext,
    input: HelloWorldInput,
) -> Result<HelloWorldOutput, WorkflowError> {
    let options = activity_options(&ctx.workflow_info().task_queue);
    let greet_input = GreetInput::new(input.name.as_str());

    let greeting_result: GreetOutput = ctx
        .call_activity(GREET_ACTIVITY, &greet_input, options.clone())
        .await?;

    let farewell_result = if input.include_goodbye {
        ctx.sleep(FAREWELL_DELAY).await?;
        let farewell: GreetOutput = ctx
            .call_activity(FAREWELL_ACTIVITY, &greet_input, options)
            .await?;
        Some(farewell)
    } else {
        None
    };

    // Runs again on every replayed task that reaches this point.
    debug!(
        workflow_id = %ctx.workflow_info().workflow_execution.workflow_id,
        farewell = farewell_result.is_some(),
        "hello world finished"
    );
    Ok(HelloWorldOutput {
        greeting_result,
        farewell_result,
        completed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn include_goodbye_defaults_to_false() {
        let input: HelloWorldInput = serde_json::from_value(json!({ "name": "Alice" })).unwrap();
        assert_eq!(input, HelloWorldInput::new("Alice"));

        let input: HelloWorldInput =
            serde_json::from_value(json!({ "name": "Bob", "includeGoodbye": true })).unwrap();
        assert!(input.include_goodbye);
    }

    #[test]
    fn absent_farewell_is_omitted() {
        let output = HelloWorldOutput {
            greeting_result: GreetOutput {
                greeting: "Hello, Alice!".to_string(),
                timestamp: "2026-10-18T09:15:02.114Z".to_string(),
            },
            farewell_result: None,
            completed: true,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(
            value,
            json!({
                "greetingResult": {
                    "greeting": "Hello, Alice!",
                    "timestamp": "2026-10-18T09:15:02.114Z"
                },
                "completed": true
            })
        );
    }

    #[test]
    fn legacy_completed_key_is_accepted() {
        let output: HelloWorldOutput = serde_json::from_value(json!({
            "greetingResult": { "greeting": "Hello, Bob!", "timestamp": "t" },
            "workflowCompleted": true
        }))
        .unwrap();
        assert!(output.completed);
        assert!(output.farewell_result.is_none());
    }

    #[test]
    fn activity_options_retry_three_times() {
        let options = activity_options("q");
        assert_eq!(options.task_queue, "q");
        assert_eq!(options.start_to_close_timeout, Duration::from_secs(60));
        let retry = options.retry_policy.unwrap();
        assert_eq!(retry.maximum_attempts, 3);
        assert_eq!(retry.backoff(1), Duration::from_secs(1));
        assert_eq!(retry.backoff(2), Duration::from_secs(2));
    }
}
