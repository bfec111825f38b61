//! Core types and utilities for greetflow.
//!
//! This crate provides the foundational types, error handling, and
//! payload encoding used by every other greetflow crate.

pub mod encoded;
pub mod error;
pub mod types;

pub use encoded::*;
pub use error::*;
pub use types::*;
