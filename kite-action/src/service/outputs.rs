//! Structured outputs
//!
//! The six outputs are the only way results reach later workflow steps.
//! Runners that provide a `GITHUB_OUTPUT` file get them appended there;
//! otherwise the legacy `::set-output` workflow command is printed.

use kite_core::domain::build::Build;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

use crate::error::ActionError;

/// Destination for named step outputs
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> io::Result<()>;
}

/// Appends outputs to the file named by `GITHUB_OUTPUT`
#[derive(Debug, Clone)]
pub struct GithubOutputFile {
    path: PathBuf,
}

impl GithubOutputFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputSink for GithubOutputFile {
    fn set_output(&mut self, name: &str, value: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if value.contains('\n') {
            let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
            writeln!(file, "{}<<{}", name, delimiter)?;
            writeln!(file, "{}", value)?;
            writeln!(file, "{}", delimiter)
        } else {
            writeln!(file, "{}={}", name, value)
        }
    }
}

/// Prints `::set-output` workflow commands
pub struct WorkflowCommandSink<W: Write> {
    writer: W,
}

impl WorkflowCommandSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> WorkflowCommandSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WorkflowCommandSink<W> {
    fn set_output(&mut self, name: &str, value: &str) -> io::Result<()> {
        writeln!(
            self.writer,
            "::set-output name={}::{}",
            name,
            escape_command_data(value)
        )?;
        self.writer.flush()
    }
}

/// Workflow-command escaping for values
fn escape_command_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Writes `id`, `number`, `url`, `web_url`, `state` and `data` for a build
pub fn emit_build_outputs(sink: &mut dyn OutputSink, build: &Build) -> Result<(), ActionError> {
    let data = serde_json::to_string(build).map_err(ActionError::Encode)?;

    let outputs = [
        ("id", build.id.clone()),
        ("number", build.number.to_string()),
        ("url", build.url.clone()),
        ("web_url", build.web_url.clone()),
        ("state", build.state.to_string()),
        ("data", data),
    ];

    for (name, value) in outputs {
        sink.set_output(name, &value)
            .map_err(|source| ActionError::Output {
                name: name.to_string(),
                source,
            })?;
    }

    debug!("Emitted outputs for build #{}", build.number);
    Ok(())
}
