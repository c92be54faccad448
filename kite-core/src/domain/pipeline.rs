//! Pipeline addressing

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Raised when a pipeline identifier is not `organization/pipeline`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pipeline must be in the form 'organization/pipeline', got '{0}'")]
pub struct InvalidPipelineSlug(pub String);

/// A pipeline addressed by organization and pipeline slug
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineSlug {
    organization: String,
    pipeline: String,
}

impl PipelineSlug {
    /// Parse an `organization/pipeline` identifier
    ///
    /// The identifier is split on the first `/`. Both halves must be
    /// non-empty and the pipeline half must not contain another `/`.
    pub fn parse(identifier: &str) -> Result<Self, InvalidPipelineSlug> {
        let invalid = || InvalidPipelineSlug(identifier.to_string());

        let (organization, pipeline) = identifier.split_once('/').ok_or_else(invalid)?;
        if organization.is_empty() || pipeline.is_empty() || pipeline.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            organization: organization.to_string(),
            pipeline: pipeline.to_string(),
        })
    }

    pub fn organization(&self) -> &str {
        &self.organization
    }

    pub fn pipeline(&self) -> &str {
        &self.pipeline
    }

    /// Build-creation endpoint for this pipeline under `api_base`
    ///
    /// # Example
    /// ```
    /// use kite_core::domain::pipeline::PipelineSlug;
    ///
    /// let slug = PipelineSlug::parse("acme/web").unwrap();
    /// assert_eq!(
    ///     slug.builds_url("https://api.buildkite.com"),
    ///     "https://api.buildkite.com/v2/organizations/acme/pipelines/web/builds"
    /// );
    /// ```
    pub fn builds_url(&self, api_base: &str) -> String {
        format!(
            "{}/v2/organizations/{}/pipelines/{}/builds",
            api_base.trim_end_matches('/'),
            self.organization,
            self.pipeline
        )
    }
}

impl FromStr for PipelineSlug {
    type Err = InvalidPipelineSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PipelineSlug::parse(s)
    }
}

impl fmt::Display for PipelineSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.organization, self.pipeline)
    }
}
