//! Data Transfer Objects sent to the Buildkite REST API

pub mod build;
