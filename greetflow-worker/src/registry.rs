//! Workflow and activity registry.
//!
//! Workflows and activities are registered by name. Typed async functions are
//! adapted into the byte-level [`Workflow`] and [`Activity`] traits with
//! [`workflow_fn`] and [`activity_fn`], which handle the JSON payload encoding.

use dashmap::DashMap;
use dyn_clone::DynClone;
use greetflow_activity::ActivityContext;
use greetflow_core::{DataConverter, FailureInfo, JsonDataConverter};
use greetflow_workflow::context::WorkflowContext;
pub use greetflow_workflow::WorkflowError;
use serde::{de::DeserializeOwned, Serialize};
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

/// Future produced by a registered workflow
pub type WorkflowFuture = Pin<Box<dyn Future<Output = Result<Vec<u8>, WorkflowError>> + Send>>;

/// Future produced by a registered activity
pub type ActivityFuture = Pin<Box<dyn Future<Output = Result<Vec<u8>, ActivityError>> + Send>>;

/// Workflow trait
pub trait Workflow: Send + Sync + DynClone {
    fn execute(&self, ctx: WorkflowContext, input: Option<Vec<u8>>) -> WorkflowFuture;
}

dyn_clone::clone_trait_object!(Workflow);

/// Activity trait
pub trait Activity: Send + Sync + DynClone {
    fn execute(&self, ctx: &ActivityContext, input: Option<Vec<u8>>) -> ActivityFuture;
}

dyn_clone::clone_trait_object!(Activity);

/// Activity error
#[derive(Debug, Clone, thiserror::Error)]
pub enum ActivityError {
    #[error("Activity execution failed: {0}")]
    ExecutionFailed(String),
    #[error("Activity panicked: {0}")]
    Panic(String),
    #[error("Retryable activity error: {0}")]
    Retryable(String),
    #[error("Non-retryable activity error: {0}")]
    NonRetryable(String),
    #[error("Activity cancelled")]
    Cancelled,
    /// The hosting worker stopped before the attempt finished; another
    /// worker may run it again.
    #[error("Worker shut down during activity execution")]
    WorkerShutdown,
    #[error("Activity timed out after {0:?}")]
    Timeout(Duration),
}

impl ActivityError {
    /// Create a retryable error
    pub fn retryable(msg: impl Into<String>) -> Self {
        Self::Retryable(msg.into())
    }

    /// Create a non-retryable error
    pub fn non_retryable(msg: impl Into<String>) -> Self {
        Self::NonRetryable(msg.into())
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::NonRetryable(_) | Self::Cancelled)
    }

    pub fn failure_type(&self) -> &'static str {
        match self {
            Self::ExecutionFailed(_) => "ExecutionFailed",
            Self::Panic(_) => "Panic",
            Self::Retryable(_) => "Retryable",
            Self::NonRetryable(_) => "NonRetryable",
            Self::Cancelled => "Cancelled",
            Self::WorkerShutdown => "WorkerShutdown",
            Self::Timeout(_) => "Timeout",
        }
    }

    /// Failure reported to the service for this error.
    pub fn to_failure(&self) -> FailureInfo {
        FailureInfo::new(self.to_string(), self.failure_type(), !self.is_retryable())
    }
}

/// Registry trait
pub trait Registry: Send + Sync {
    /// Register a workflow
    fn register_workflow(&self, name: &str, workflow: Box<dyn Workflow>);

    /// Register an activity
    fn register_activity(&self, name: &str, activity: Box<dyn Activity>);

    /// Names of registered workflows
    fn get_registered_workflows(&self) -> Vec<String>;

    /// Names of registered activities
    fn get_registered_activities(&self) -> Vec<String>;

    /// Get workflow by name
    fn get_workflow(&self, name: &str) -> Option<Box<dyn Workflow>>;

    /// Get activity by name
    fn get_activity(&self, name: &str) -> Option<Box<dyn Activity>>;
}

/// Workflow registry implementation using DashMap for concurrent access
pub struct WorkflowRegistry {
    workflows: Arc<DashMap<String, Box<dyn Workflow>>>,
    activities: Arc<DashMap<String, Box<dyn Activity>>>,
}

impl WorkflowRegistry {
    pub fn new() -> Self {
        Self {
            workflows: Arc::new(DashMap::new()),
            activities: Arc::new(DashMap::new()),
        }
    }
}

impl Default for WorkflowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for WorkflowRegistry {
    fn clone(&self) -> Self {
        Self {
            workflows: Arc::clone(&self.workflows),
            activities: Arc::clone(&self.activities),
        }
    }
}

impl Registry for WorkflowRegistry {
    fn register_workflow(&self, name: &str, workflow: Box<dyn Workflow>) {
        self.workflows.insert(name.to_string(), workflow);
    }

    fn register_activity(&self, name: &str, activity: Box<dyn Activity>) {
        self.activities.insert(name.to_string(), activity);
    }

    fn get_registered_workflows(&self) -> Vec<String> {
        let mut names: Vec<String> = self.workflows.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    fn get_registered_activities(&self) -> Vec<String> {
        let mut names: Vec<String> = self.activities.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    fn get_workflow(&self, name: &str) -> Option<Box<dyn Workflow>> {
        self.workflows.get(name).map(|entry| entry.clone())
    }

    fn get_activity(&self, name: &str) -> Option<Box<dyn Activity>> {
        self.activities.get(name).map(|entry| entry.clone())
    }
}

/// A typed workflow function adapted to [`Workflow`].
pub struct WorkflowFn<F, I, O> {
    f: F,
    _types: PhantomData<fn(I) -> O>,
}

impl<F: Clone, I, O> Clone for WorkflowFn<F, I, O> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _types: PhantomData,
        }
    }
}

/// Adapt `async fn(WorkflowContext, I) -> Result<O, WorkflowError>` into a [`Workflow`].
pub fn workflow_fn<F, Fut, I, O>(f: F) -> Box<dyn Workflow>
where
    F: Fn(WorkflowContext, I) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<O, WorkflowError>> + Send + 'static,
    I: DeserializeOwned + 'static,
    O: Serialize + 'static,
{
    Box::new(WorkflowFn {
        f,
        _types: PhantomData,
    })
}

impl<F, Fut, I, O> Workflow for WorkflowFn<F, I, O>
where
    F: Fn(WorkflowContext, I) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<O, WorkflowError>> + Send + 'static,
    I: DeserializeOwned + 'static,
    O: Serialize + 'static,
{
    fn execute(&self, ctx: WorkflowContext, input: Option<Vec<u8>>) -> WorkflowFuture {
        let converter = JsonDataConverter::new();
        let input: I = match converter.decode_optional(input.as_deref()) {
            Ok(input) => input,
            Err(e) => return Box::pin(async move { Err(WorkflowError::Serialization(e)) }),
        };
        let run = (self.f)(ctx, input);
        Box::pin(async move {
            let output = run.await?;
            Ok(converter.encode(&output)?)
        })
    }
}

/// A typed activity function adapted to [`Activity`].
pub struct ActivityFn<F, I, O> {
    f: F,
    _types: PhantomData<fn(I) -> O>,
}

impl<F: Clone, I, O> Clone for ActivityFn<F, I, O> {
    fn clone(&self) -> Self {
        Self {
            f: self.f.clone(),
            _types: PhantomData,
        }
    }
}

/// Adapt `async fn(ActivityContext, I) -> Result<O, ActivityError>` into an [`Activity`].
pub fn activity_fn<F, Fut, I, O>(f: F) -> Box<dyn Activity>
where
    F: Fn(ActivityContext, I) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<O, ActivityError>> + Send + 'static,
    I: DeserializeOwned + 'static,
    O: Serialize + 'static,
{
    Box::new(ActivityFn {
        f,
        _types: PhantomData,
    })
}

impl<F, Fut, I, O> Activity for ActivityFn<F, I, O>
where
    F: Fn(ActivityContext, I) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<O, ActivityError>> + Send + 'static,
    I: DeserializeOwned + 'static,
    O: Serialize + 'static,
{
    fn execute(&self, ctx: &ActivityContext, input: Option<Vec<u8>>) -> ActivityFuture {
        let converter = JsonDataConverter::new();
        let input: I = match converter.decode_optional(input.as_deref()) {
            Ok(input) => input,
            Err(e) => {
                return Box::pin(async move {
                    Err(ActivityError::NonRetryable(format!("invalid activity input: {e}")))
                })
            }
        };
        let run = (self.f)(ctx.clone(), input);
        Box::pin(async move {
            let output = run.await?;
            converter
                .encode(&output)
                .map_err(|e| ActivityError::NonRetryable(e.to_string()))
        })
    }
}
