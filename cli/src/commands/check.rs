//! `kubedash check` — Docker / Docker Compose environment probe.

use anyhow::Result;
use clap::Args;
use kubedash_common::ComposeFlavor;

use crate::app::AppContext;
use crate::application::services::env_probe;
use crate::domain::{ProbeFailed, ProbeReport, ProbeStatus};
use crate::output::{OutputContext, json};

/// Arguments for the check command.
#[derive(Args)]
pub struct CheckArgs {
    /// Compose front end to query (overrides the config file)
    #[arg(long, value_enum)]
    pub compose: Option<ComposeFlavor>,
}

/// Run `kubedash check`.
///
/// # Errors
///
/// Returns `ProbeFailed` when the Docker daemon is unreachable or its
/// version cannot be read, which exits the process with status 1.
pub async fn run(app: &AppContext, args: &CheckArgs) -> Result<()> {
    let flavor = args.compose.unwrap_or(app.config.compose);
    let report = env_probe::probe(&app.runner, &app.reporter(), flavor).await;
    if !report.ok() {
        return ensure_ok(report);
    }

    if app.is_json() {
        json::print(&report)
    } else {
        print_report(&app.output, &report);
        Ok(())
    }
}

/// Turn a failed report into an error carrying its message.
///
/// # Errors
///
/// Returns `ProbeFailed` when `report.status` is `Fail`.
pub fn ensure_ok(report: ProbeReport) -> Result<()> {
    if report.ok() {
        Ok(())
    } else {
        Err(ProbeFailed(report.message).into())
    }
}

/// Print the probe result for humans.
pub fn print_report(ctx: &OutputContext, report: &ProbeReport) {
    // The failure message itself is printed by `main`.
    if !report.ok() {
        return;
    }
    ctx.header("Environment");
    ctx.kv("Docker:        ", &report.info.docker_version);
    if report.status == ProbeStatus::Pass {
        ctx.kv("Docker Compose:", &report.info.docker_compose_version);
    } else {
        for line in report.message.lines().skip(1) {
            ctx.warn(line);
        }
    }
}
