//! Kite
//!
//! A GitHub Action that triggers a Buildkite build and optionally waits for it.
//!
//! Architecture:
//! - Configuration: action inputs read from the environment
//! - Services: trigger, outcome classification, output publishing
//! - Scheduler: polling loop that follows the build to completion
//!
//! Results are published as step outputs; a build that does not pass makes
//! the process exit non-zero after the outputs are written.

mod config;
mod error;
mod execution;
mod scheduler;
mod service;
#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use kite_client::{BuildTransport, BuildkiteClient, FixtureTransport};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ActionConfig;
use crate::execution::{RunContext, run_action};
use crate::scheduler::TokioClock;
use crate::service::{GithubOutputFile, OutputSink, WorkflowCommandSink};

#[derive(Parser)]
#[command(name = "kite")]
#[command(about = "Trigger a Buildkite build from GitHub Actions", long_about = None)]
struct Cli {
    /// Return as soon as the build is created
    #[arg(long = "async")]
    async_mode: bool,

    /// Read API responses from fixture files instead of Buildkite
    #[arg(long)]
    test_mode: bool,

    /// Directory holding create_build.json and build_passed.json
    #[arg(long)]
    fixtures_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries progress lines and workflow commands
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kite=info,kite_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = load_config(cli)?;
    info!(
        "Loaded configuration: pipeline={}, async={}, test_mode={}",
        config.pipeline, config.is_async, config.test_mode
    );

    let transport: Box<dyn BuildTransport> = if config.test_mode {
        info!("Test mode, reading fixtures from {}", config.fixtures_dir.display());
        Box::new(FixtureTransport::new(config.fixtures_dir.clone()))
    } else {
        Box::new(BuildkiteClient::new(config.access_token.clone()).context("Failed to create HTTP client")?)
    };

    let mut outputs: Box<dyn OutputSink> = match &config.output_file {
        Some(path) => Box::new(GithubOutputFile::new(path)),
        None => Box::new(WorkflowCommandSink::stdout()),
    };

    let ctx = RunContext {
        transport: transport.as_ref(),
        clock: &TokioClock,
        outputs: outputs.as_mut(),
    };

    // The returned error is printed once by the runtime on exit
    if let Err(e) = run_action(&config, ctx).await {
        if e.is_input_error() {
            eprintln!("{}", "Check the action inputs and try again.".yellow());
        }
        return Err(e.into());
    }

    Ok(())
}

/// Loads configuration from the environment, letting CLI flags take precedence
fn load_config(cli: Cli) -> Result<ActionConfig> {
    let fixtures_dir = cli
        .fixtures_dir
        .map(|dir| dir.to_string_lossy().into_owned());

    ActionConfig::from_lookup(|key| match key {
        "INPUT_ASYNC" if cli.async_mode => Some("true".to_string()),
        "INPUT_TEST_MODE" if cli.test_mode => Some("true".to_string()),
        "INPUT_FIXTURES_DIR" if fixtures_dir.is_some() => fixtures_dir.clone(),
        _ => std::env::var(key).ok(),
    })
    .context("Invalid action configuration")
}
