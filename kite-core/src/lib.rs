//! Kite Core
//!
//! Core types for triggering and observing Buildkite builds.
//!
//! This crate contains:
//! - Domain types: the build record, its state and the pipeline slug
//! - DTOs: request bodies sent to the Buildkite REST API

pub mod domain;
pub mod dto;
