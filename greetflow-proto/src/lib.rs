//! Protocol definitions for the greetflow workflow service.
//!
//! This crate contains the protobuf messages and gRPC client generated from
//! `proto/greetflow/api/v1/service.proto`, the transport-agnostic
//! [`WorkflowService`] trait that workers and clients program against, and
//! conversions between wire messages and `greetflow-core` types.

pub mod conversions;
pub mod generated;
pub mod workflow_service;

pub use generated::workflow_service_client::WorkflowServiceClient;
pub use workflow_service::WorkflowService;

// Re-export prost for crates that build or inspect wire messages
pub use prost;
