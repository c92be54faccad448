//! Action run
//!
//! One run is: trigger a build, optionally wait for it, publish outputs, then
//! decide the exit status. Outputs are always written before a failed build
//! turns into an error, so later steps can inspect what happened.

use colored::*;
use kite_client::BuildTransport;
use kite_core::domain::build::Build;
use tracing::info;

use crate::config::ActionConfig;
use crate::error::ActionError;
use crate::scheduler::{BuildWaiter, Clock};
use crate::service::{OutputSink, check_outcome, emit_build_outputs, state_symbol, trigger_build};

/// Collaborators a run needs besides its configuration
pub struct RunContext<'a> {
    pub transport: &'a dyn BuildTransport,
    pub clock: &'a dyn Clock,
    pub outputs: &'a mut dyn OutputSink,
}

/// Executes one action run and returns the last build record seen
pub async fn run_action(config: &ActionConfig, ctx: RunContext<'_>) -> Result<Build, ActionError> {
    println!(
        "🪁 Triggering {} for {}@{}",
        config.pipeline.bold(),
        config.branch,
        config.commit
    );

    let build = trigger_build(ctx.transport, config).await?;
    println!("🔗 Build started: {}", build.web_url.cyan());

    let waited = !config.is_async;
    let build = if waited {
        BuildWaiter::new(ctx.transport, ctx.clock).wait(build).await?
    } else {
        info!("Async mode, not waiting for build #{}", build.number);
        build
    };

    print_build_summary(&build);

    emit_build_outputs(ctx.outputs, &build)?;
    check_outcome(&build, waited)?;

    Ok(build)
}

/// Print the final state of a build
fn print_build_summary(build: &Build) {
    let state = build.state.as_str();
    let state_colored = if build.state.is_accepted() {
        state.green()
    } else {
        state.red()
    };

    println!(
        "{} Build #{} is {}",
        state_symbol(&build.state),
        build.number,
        state_colored
    );

    if let Some(duration) = build.duration() {
        println!("  Duration: {}s", duration.num_seconds());
    }
}
