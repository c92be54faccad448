//! Kite HTTP Client
//!
//! A small, type-safe client for the parts of the Buildkite REST API needed to
//! trigger a build and follow it to completion.
//!
//! Two transports are provided behind [`BuildTransport`]:
//! - [`BuildkiteClient`] talks to the live API with a bearer token
//! - [`FixtureTransport`] reads canned responses from disk
//!
//! # Example
//!
//! ```no_run
//! use kite_client::{BuildTransport, BuildkiteClient};
//! use kite_core::domain::pipeline::PipelineSlug;
//! use kite_core::dto::build::{Author, CreateBuild};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = BuildkiteClient::new("bkua_token")?;
//!     let pipeline = PipelineSlug::parse("acme/web")?;
//!
//!     let build = client
//!         .create_build(&pipeline, &CreateBuild {
//!             commit: "HEAD".to_string(),
//!             branch: "main".to_string(),
//!             message: "Hello from kite".to_string(),
//!             author: Author { name: "octocat".to_string() },
//!             env: Default::default(),
//!         })
//!         .await?;
//!
//!     println!("Started build #{}", build.number);
//!     Ok(())
//! }
//! ```

mod builds;
pub mod error;
mod fixtures;
mod transport;

pub use error::{ClientError, Result};
pub use fixtures::FixtureTransport;
pub use transport::BuildTransport;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Public Buildkite API endpoint
pub const DEFAULT_API_URL: &str = "https://api.buildkite.com";

/// Per-request timeout applied by [`BuildkiteClient::new`]
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Buildkite REST API
#[derive(Clone)]
pub struct BuildkiteClient {
    /// Base URL of the API (e.g., "https://api.buildkite.com")
    base_url: String,
    /// Bearer token sent with every request
    access_token: String,
    /// HTTP client instance
    client: Client,
}

impl std::fmt::Debug for BuildkiteClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildkiteClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl BuildkiteClient {
    /// Create a client for the public API with the default request timeout
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        Self::with_timeout(DEFAULT_API_URL, access_token, REQUEST_TIMEOUT)
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, access_token, client))
    }

    /// Create a client with a custom base URL and HTTP client
    ///
    /// This allows you to point at a local mock server or configure proxies,
    /// TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use kite_client::BuildkiteClient;
    /// use reqwest::Client;
    ///
    /// let client = BuildkiteClient::with_client("http://localhost:8080/", "token", Client::new());
    /// assert_eq!(client.base_url(), "http://localhost:8080");
    /// ```
    pub fn with_client(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        client: Client,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success status codes become [`ClientError::ApiError`] carrying the
    /// response body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = BuildkiteClient::new("token").unwrap();
        assert_eq!(client.base_url(), DEFAULT_API_URL);
    }

    #[test]
    fn test_default_request_timeout() {
        assert_eq!(REQUEST_TIMEOUT, Duration::from_secs(10));
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = BuildkiteClient::with_client("http://localhost:8080/", "token", Client::new());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_debug_hides_token() {
        let client = BuildkiteClient::with_client("http://localhost:8080", "secret-token", Client::new());
        assert!(!format!("{:?}", client).contains("secret-token"));
    }
}
