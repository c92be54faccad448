//! Test doubles shared by the action's unit tests

use async_trait::async_trait;
use kite_client::{BuildTransport, ClientError, Result};
use kite_core::domain::build::Build;
use kite_core::domain::pipeline::PipelineSlug;
use kite_core::dto::build::CreateBuild;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::service::OutputSink;

/// Raw API object with the handful of fields the action reads; `finished_at`
/// is only present when given
pub(crate) fn raw_build(state: &str, finished_at: Option<&str>) -> Value {
    let mut raw = json!({
        "id": "1",
        "number": 5,
        "url": "U",
        "web_url": "W",
        "state": state
    });
    if let Some(finished_at) = finished_at {
        raw["finished_at"] = json!(finished_at);
    }
    raw
}

/// Build a record from the handful of fields the action reads
pub(crate) fn build(state: &str, finished_at: Option<&str>) -> Build {
    record(raw_build(state, finished_at))
}

/// Decode a record from a raw API object
pub(crate) fn record(raw: Value) -> Build {
    serde_json::from_value(raw).unwrap()
}

/// Parse the `data` output back into the JSON object it encodes
pub(crate) fn data_value(sink: &MemorySink) -> Value {
    serde_json::from_str(sink.get("data").unwrap()).unwrap()
}

/// Transport that replays a fixed script of responses and records calls
pub(crate) struct ScriptedTransport {
    created: Build,
    polls: Mutex<VecDeque<Build>>,
    requests: Mutex<Vec<(String, CreateBuild)>>,
    fetched: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(crate) fn new(created: Build, polls: Vec<Build>) -> Self {
        Self {
            created,
            polls: Mutex::new(polls.into()),
            requests: Mutex::new(Vec::new()),
            fetched: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<(String, CreateBuild)> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }
}

#[async_trait]
impl BuildTransport for ScriptedTransport {
    async fn create_build(&self, pipeline: &PipelineSlug, req: &CreateBuild) -> Result<Build> {
        self.requests
            .lock()
            .unwrap()
            .push((pipeline.to_string(), req.clone()));
        Ok(self.created.clone())
    }

    async fn get_build(&self, url: &str) -> Result<Build> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::api_error(500, "no scripted response left"))
    }
}

/// Output sink that keeps everything in memory
#[derive(Debug, Default)]
pub(crate) struct MemorySink {
    pub(crate) outputs: Vec<(String, String)>,
}

impl MemorySink {
    pub(crate) fn get(&self, name: &str) -> Option<&str> {
        self.outputs
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl OutputSink for MemorySink {
    fn set_output(&mut self, name: &str, value: &str) -> std::io::Result<()> {
        self.outputs.push((name.to_string(), value.to_string()));
        Ok(())
    }
}
