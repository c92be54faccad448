//! Build trigger
//!
//! Turns the action configuration into a build-creation request and sends it
//! once. Failures are not retried.

use kite_client::BuildTransport;
use kite_core::domain::build::Build;
use kite_core::domain::pipeline::PipelineSlug;
use kite_core::dto::build::{Author, CreateBuild};
use tracing::{info, warn};

use crate::config::ActionConfig;
use crate::error::ActionError;

/// Request body for the configured commit
pub fn build_request(config: &ActionConfig) -> CreateBuild {
    CreateBuild {
        commit: config.commit.clone(),
        branch: config.branch.clone(),
        message: config.message.clone(),
        author: Author {
            name: config.author.clone(),
        },
        env: config.env.clone(),
    }
}

/// Starts a build of the configured pipeline
///
/// The pipeline identifier is validated before anything is sent.
pub async fn trigger_build(
    transport: &dyn BuildTransport,
    config: &ActionConfig,
) -> Result<Build, ActionError> {
    let pipeline = PipelineSlug::parse(&config.pipeline)?;
    let req = build_request(config);

    info!(
        "Creating build on {} for {}@{}",
        pipeline, config.branch, config.commit
    );

    let build = transport.create_build(&pipeline, &req).await.map_err(|e| {
        if e.is_not_found() {
            warn!("Pipeline {} not found, or the token cannot see it", pipeline);
        } else if e.is_unauthorized() {
            warn!("Access token was rejected by Buildkite");
        }
        ActionError::from(e)
    })?;

    info!("Created build #{} ({})", build.number, build.state);
    Ok(build)
}
