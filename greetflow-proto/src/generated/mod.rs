//! Code generated by tonic-build from `proto/greetflow/api/v1/service.proto`.
//!
//! Do not edit by hand; enable the `codegen` feature to regenerate.

#![allow(clippy::all)]
#![allow(missing_docs)]

include!("greetflow.api.v1.rs");
