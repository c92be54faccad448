//! Transport abstraction
//!
//! The action only ever needs two calls: create a build and fetch a build.
//! Both the live HTTP client and the fixture reader implement this trait so
//! the caller never branches on test mode.

use async_trait::async_trait;
use kite_core::domain::build::Build;
use kite_core::domain::pipeline::PipelineSlug;
use kite_core::dto::build::CreateBuild;

use crate::error::Result;

/// Source of build records
#[async_trait]
pub trait BuildTransport: Send + Sync {
    /// Start a new build on `pipeline`
    async fn create_build(&self, pipeline: &PipelineSlug, req: &CreateBuild) -> Result<Build>;

    /// Fetch the current record of a build by its API URL
    async fn get_build(&self, url: &str) -> Result<Build>;
}
