//! Build DTOs sent to the Buildkite API

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Request body for creating a build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBuild {
    pub commit: String,
    pub branch: String,
    pub message: String,
    pub author: Author,
    pub env: HashMap<String, String>,
}

/// Build author as shown in the Buildkite UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
}
