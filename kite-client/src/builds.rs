//! Build-related API endpoints

use async_trait::async_trait;
use kite_core::domain::build::Build;
use kite_core::domain::pipeline::PipelineSlug;
use kite_core::dto::build::CreateBuild;
use tracing::debug;

use crate::BuildkiteClient;
use crate::error::Result;
use crate::transport::BuildTransport;

impl BuildkiteClient {
    // =============================================================================
    // Build Lifecycle
    // =============================================================================

    /// Create a build on a pipeline
    ///
    /// # Arguments
    /// * `pipeline` - The pipeline to build
    /// * `req` - Commit, branch, message, author and extra environment
    ///
    /// # Returns
    /// The build record as created (usually `scheduled`)
    pub async fn create_pipeline_build(
        &self,
        pipeline: &PipelineSlug,
        req: &CreateBuild,
    ) -> Result<Build> {
        let url = pipeline.builds_url(&self.base_url);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Fetch a build by its API URL
    ///
    /// # Arguments
    /// * `url` - The `url` field of a previously returned build record
    pub async fn fetch_build(&self, url: &str) -> Result<Build> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl BuildTransport for BuildkiteClient {
    async fn create_build(&self, pipeline: &PipelineSlug, req: &CreateBuild) -> Result<Build> {
        self.create_pipeline_build(pipeline, req).await
    }

    async fn get_build(&self, url: &str) -> Result<Build> {
        self.fetch_build(url).await
    }
}
