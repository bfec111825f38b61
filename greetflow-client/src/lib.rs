//! Client for the greetflow workflow service.
//!
//! Starts workflow executions, waits for their results and requests their
//! cancellation. [`WorkflowClient`] works against any
//! [`WorkflowService`](greetflow_proto::WorkflowService); [`WorkflowClient::connect`]
//! wires it to the gRPC implementation in [`grpc`].

pub mod client;
pub mod grpc;
pub mod options;

pub use client::*;
pub use grpc::*;
pub use options::*;
