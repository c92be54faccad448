//! Action error taxonomy
//!
//! Every variant is fatal: the run aborts and the process exits non-zero.

use kite_client::ClientError;
use kite_core::domain::build::BuildState;
use kite_core::domain::pipeline::InvalidPipelineSlug;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActionError {
    /// A required input was not provided
    #[error("{0} environment variable not set")]
    MissingVariable(&'static str),

    /// `INPUT_ENV` is not a JSON object of strings
    #[error("INPUT_ENV must be a JSON object of string values: {0}")]
    InvalidEnv(#[source] serde_json::Error),

    /// Pipeline identifier is not `organization/pipeline`
    #[error(transparent)]
    InvalidPipeline(#[from] InvalidPipelineSlug),

    /// Trigger or poll request failed
    #[error("Buildkite request failed: {0}")]
    Transport(#[from] ClientError),

    /// The build ended in a state that is not accepted
    #[error("Build failed with state {0}")]
    BuildFailed(BuildState),

    /// Structured output could not be written
    #[error("Failed to write output '{name}': {source}")]
    Output {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// Build record could not be encoded for the `data` output
    #[error("Failed to encode build record: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ActionError {
    /// Errors caused by the action's inputs rather than by Buildkite
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingVariable(_) | Self::InvalidEnv(_) | Self::InvalidPipeline(_)
        )
    }
}
