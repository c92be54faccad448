//! Action configuration
//!
//! Inputs arrive as environment variables the way GitHub Actions passes them
//! to a container action (`INPUT_<NAME>`), plus the workflow's own
//! `GITHUB_ACTOR` and `GITHUB_OUTPUT`.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::ActionError;

/// Default directory searched for fixtures in test mode
pub const DEFAULT_FIXTURES_DIR: &str = "fixtures";

/// Action configuration
///
/// Built once per run by [`ActionConfig::from_lookup`] and never mutated after.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionConfig {
    /// Name shown as the build author
    pub author: String,

    /// Buildkite API access token
    pub access_token: String,

    /// Pipeline identifier, `organization/pipeline`
    pub pipeline: String,

    pub branch: String,
    pub commit: String,
    pub message: String,

    /// Extra environment variables passed to the build
    pub env: HashMap<String, String>,

    /// Return right after triggering instead of waiting for completion
    pub is_async: bool,

    /// Serve API responses from fixture files
    pub test_mode: bool,

    /// Directory holding the fixture files
    pub fixtures_dir: PathBuf,

    /// File that receives structured outputs, when the runner provides one
    pub output_file: Option<PathBuf>,
}

impl ActionConfig {
    /// Creates configuration from a variable lookup, usually the process
    /// environment
    ///
    /// Expected variables:
    /// - GITHUB_ACTOR (required)
    /// - INPUT_ACCESS_TOKEN (required)
    /// - INPUT_PIPELINE (required)
    /// - INPUT_BRANCH (required)
    /// - INPUT_COMMIT (required)
    /// - INPUT_MESSAGE (required)
    /// - INPUT_ENV (optional, JSON object, default: {})
    /// - INPUT_ASYNC (optional, "true" in any case, default: false)
    /// - INPUT_TEST_MODE (optional, "true" in any case, default: false)
    /// - INPUT_FIXTURES_DIR (optional, default: fixtures)
    /// - GITHUB_OUTPUT (optional)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ActionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ActionError::MissingVariable(key));
        let flag = |key: &str| {
            lookup(key)
                .map(|value| value.eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        };

        let author = required("GITHUB_ACTOR")?;
        let access_token = required("INPUT_ACCESS_TOKEN")?;
        let pipeline = required("INPUT_PIPELINE")?;
        let branch = required("INPUT_BRANCH")?;
        let commit = required("INPUT_COMMIT")?;
        let message = required("INPUT_MESSAGE")?;

        let env = parse_env_map(lookup("INPUT_ENV").as_deref())?;

        let fixtures_dir = lookup("INPUT_FIXTURES_DIR")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURES_DIR));

        let output_file = lookup("GITHUB_OUTPUT")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            author,
            access_token,
            pipeline,
            branch,
            commit,
            message,
            env,
            is_async: flag("INPUT_ASYNC"),
            test_mode: flag("INPUT_TEST_MODE"),
            fixtures_dir,
            output_file,
        })
    }
}

/// Parses the `INPUT_ENV` JSON object; unset or blank means no variables
fn parse_env_map(raw: Option<&str>) -> Result<HashMap<String, String>, ActionError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(HashMap::new()),
        Some(json) => serde_json::from_str(json).map_err(ActionError::InvalidEnv),
    }
}
