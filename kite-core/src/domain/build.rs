//! Build domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Build record as returned by the Buildkite API
///
/// Only the fields the action reads are typed. Everything else the API sends
/// is kept in `extra`, so encoding a record yields the object it was decoded
/// from. `finished_at` lives there too: the API sends it as `null` while a
/// build runs, and a missing key must stay missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Build {
    pub id: String,
    pub number: u64,
    pub url: String,
    pub web_url: String,
    pub state: BuildState,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Build {
    /// Raw `finished_at` value, if the API sent a string
    pub fn finished_at(&self) -> Option<&str> {
        self.extra.get("finished_at").and_then(Value::as_str)
    }

    /// Whether the API has stamped a completion time on this build
    pub fn is_finished(&self) -> bool {
        self.finished_at().is_some_and(|finished| !finished.is_empty())
    }

    /// Completion time, if present and parseable as RFC 3339
    pub fn finished_time(&self) -> Option<DateTime<Utc>> {
        self.finished_at().and_then(parse_timestamp)
    }

    /// Start time, if the API reported one
    pub fn started_time(&self) -> Option<DateTime<Utc>> {
        self.extra
            .get("started_at")
            .and_then(Value::as_str)
            .and_then(parse_timestamp)
    }

    /// Wall-clock duration between start and finish
    pub fn duration(&self) -> Option<chrono::Duration> {
        let started = self.started_time()?;
        let finished = self.finished_time()?;
        Some(finished.signed_duration_since(started))
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Build lifecycle state
///
/// Buildkite reports states as lowercase strings. States this crate does not
/// know about are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildState {
    Scheduled,
    Running,
    Passed,
    Failed,
    Failing,
    Blocked,
    Canceling,
    Canceled,
    Skipped,
    NotRun,
    Other(String),
}

impl BuildState {
    /// The wire representation of this state
    pub fn as_str(&self) -> &str {
        match self {
            BuildState::Scheduled => "scheduled",
            BuildState::Running => "running",
            BuildState::Passed => "passed",
            BuildState::Failed => "failed",
            BuildState::Failing => "failing",
            BuildState::Blocked => "blocked",
            BuildState::Canceling => "canceling",
            BuildState::Canceled => "canceled",
            BuildState::Skipped => "skipped",
            BuildState::NotRun => "not_run",
            BuildState::Other(raw) => raw,
        }
    }

    /// States that do not count as a failed build
    pub fn is_accepted(&self) -> bool {
        matches!(
            self,
            BuildState::Scheduled | BuildState::Running | BuildState::Passed
        )
    }

    /// States that mean the build has not reached an outcome yet
    pub fn is_in_progress(&self) -> bool {
        matches!(self, BuildState::Scheduled | BuildState::Running)
    }
}

impl From<String> for BuildState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "scheduled" => BuildState::Scheduled,
            "running" => BuildState::Running,
            "passed" => BuildState::Passed,
            "failed" => BuildState::Failed,
            "failing" => BuildState::Failing,
            "blocked" => BuildState::Blocked,
            "canceling" => BuildState::Canceling,
            "canceled" => BuildState::Canceled,
            "skipped" => BuildState::Skipped,
            "not_run" => BuildState::NotRun,
            _ => BuildState::Other(raw),
        }
    }
}

impl From<&str> for BuildState {
    fn from(raw: &str) -> Self {
        BuildState::from(raw.to_string())
    }
}

impl From<BuildState> for String {
    fn from(state: BuildState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_minimal_record() {
        let build: Build = serde_json::from_value(json!({
            "id": "1",
            "number": 5,
            "url": "U",
            "web_url": "W",
            "state": "scheduled"
        }))
        .unwrap();

        assert_eq!(build.id, "1");
        assert_eq!(build.number, 5);
        assert_eq!(build.state, BuildState::Scheduled);
        assert!(build.finished_at().is_none());
        assert!(!build.is_finished());
    }

    #[test]
    fn test_null_or_empty_finished_at_is_in_flight() {
        let mut build: Build = serde_json::from_value(json!({
            "id": "1",
            "number": 5,
            "url": "U",
            "web_url": "W",
            "state": "running",
            "finished_at": null
        }))
        .unwrap();
        assert!(!build.is_finished());

        build.extra.insert("finished_at".to_string(), json!(""));
        assert!(!build.is_finished());

        build
            .extra
            .insert("finished_at".to_string(), json!("2024-01-01T00:00:00Z"));
        assert!(build.is_finished());
    }

    #[test]
    fn test_unknown_fields_survive_reencoding() {
        let raw = json!({
            "id": "f62a1b4d",
            "number": 12,
            "url": "https://api.buildkite.com/v2/organizations/acme/pipelines/app/builds/12",
            "web_url": "https://buildkite.com/acme/app/builds/12",
            "state": "passed",
            "finished_at": "2024-01-01T00:00:00Z",
            "creator": { "name": "octocat" },
            "jobs": [{ "id": "a", "state": "passed" }]
        });

        let build: Build = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&build).unwrap(), raw);
    }

    #[test]
    fn test_reencoding_keeps_absent_finished_at_absent() {
        let raw = json!({
            "id": "1",
            "number": 5,
            "url": "U",
            "web_url": "W",
            "state": "scheduled"
        });

        let build: Build = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&build).unwrap(), raw);
    }

    #[test]
    fn test_reencoding_keeps_null_finished_at_null() {
        let raw = json!({
            "id": "1",
            "number": 5,
            "url": "U",
            "web_url": "W",
            "state": "running",
            "finished_at": null
        });

        let build: Build = serde_json::from_value(raw.clone()).unwrap();
        assert!(!build.is_finished());
        assert_eq!(serde_json::to_value(&build).unwrap(), raw);
    }

    #[test]
    fn test_unknown_state_is_preserved() {
        let state = BuildState::from("waiting_for_godot");
        assert_eq!(state, BuildState::Other("waiting_for_godot".to_string()));
        assert_eq!(state.as_str(), "waiting_for_godot");
        assert!(!state.is_accepted());
    }

    #[test]
    fn test_accepted_states() {
        assert!(BuildState::Scheduled.is_accepted());
        assert!(BuildState::Running.is_accepted());
        assert!(BuildState::Passed.is_accepted());
        assert!(!BuildState::Failed.is_accepted());
        assert!(!BuildState::Canceled.is_accepted());
        assert!(!BuildState::NotRun.is_accepted());
    }

    #[test]
    fn test_duration_from_timestamps() {
        let build: Build = serde_json::from_value(json!({
            "id": "1",
            "number": 5,
            "url": "U",
            "web_url": "W",
            "state": "passed",
            "started_at": "2024-01-01T00:00:00Z",
            "finished_at": "2024-01-01T00:02:30Z"
        }))
        .unwrap();

        assert_eq!(build.duration().map(|d| d.num_seconds()), Some(150));
    }
}
