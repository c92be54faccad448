//! Core domain types
//!
//! These types describe what the Buildkite API hands back and how a pipeline
//! is addressed. They are shared between the HTTP client and the action.

pub mod build;
pub mod pipeline;
