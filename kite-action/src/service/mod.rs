//! Service layer
//!
//! Services hold the action's business logic: starting a build, judging its
//! outcome and publishing the results back to the workflow.
//!
//! Output publishing is trait-based so runs can be tested without touching
//! the real workflow files.

pub mod outcome;
pub mod outputs;
pub mod trigger;

pub use outcome::{check_outcome, state_symbol};
pub use outputs::{GithubOutputFile, OutputSink, WorkflowCommandSink, emit_build_outputs};
pub use trigger::trigger_build;
