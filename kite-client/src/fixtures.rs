//! Fixture-backed transport
//!
//! Serves build records from JSON files instead of the network, so a run can be
//! exercised end to end without credentials.

use async_trait::async_trait;
use kite_core::domain::build::Build;
use kite_core::domain::pipeline::PipelineSlug;
use kite_core::dto::build::CreateBuild;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::transport::BuildTransport;

/// File answered for every build creation
pub const CREATE_BUILD_FIXTURE: &str = "create_build.json";

/// File answered for every build fetch
pub const BUILD_PASSED_FIXTURE: &str = "build_passed.json";

/// Transport that reads canned responses from a directory
#[derive(Debug, Clone)]
pub struct FixtureTransport {
    dir: PathBuf,
}

impl FixtureTransport {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_build(&self, name: &str) -> Result<Build> {
        let path = self.dir.join(name);
        debug!("Reading fixture {}", path.display());

        let raw = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ClientError::FixtureUnreadable {
                path: path.clone(),
                source,
            })?;

        serde_json::from_str(&raw).map_err(|e| {
            ClientError::ParseError(format!("Invalid fixture {}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl BuildTransport for FixtureTransport {
    async fn create_build(&self, pipeline: &PipelineSlug, _req: &CreateBuild) -> Result<Build> {
        debug!("Serving fixture build for {}", pipeline);
        self.read_build(CREATE_BUILD_FIXTURE).await
    }

    async fn get_build(&self, _url: &str) -> Result<Build> {
        self.read_build(BUILD_PASSED_FIXTURE).await
    }
}
