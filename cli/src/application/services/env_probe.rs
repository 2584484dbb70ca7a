//! Application service — Docker environment probe use-case.
//!
//! Imports only from `crate::domain`, `crate::application::ports` and the
//! shared config types. All process execution goes through `CommandRunner`.

use kubedash_common::ComposeFlavor;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::environment::{
    DOCKER_UNAVAILABLE_HINT, ProbeReport, parse_compose_version, parse_compose_version_json,
    summarize,
};

/// Probe Docker and Docker Compose.
///
/// Steps, stopping at the first fatal one:
/// 1. `docker info` — daemon reachable, else `Fail` with install/start hints.
/// 2. `docker version --format {{.Server.Version}}` — else `Fail`.
/// 3. Compose version per `flavor`; a missing Compose is a `Warn`.
pub async fn probe(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    flavor: ComposeFlavor,
) -> ProbeReport {
    reporter.step("checking Docker daemon...");
    match runner.run("docker", &["info"]).await {
        Ok(out) if out.status.success() => {}
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            tracing::error!(stderr = %stderr.trim(), "docker info failed");
            return ProbeReport::fail(with_detail(DOCKER_UNAVAILABLE_HINT, stderr.trim()));
        }
        Err(e) => {
            tracing::error!(error = %e, "docker info could not run");
            return ProbeReport::fail(with_detail(DOCKER_UNAVAILABLE_HINT, &e.to_string()));
        }
    }

    reporter.step("reading Docker version...");
    let docker_version = stdout_of(
        runner,
        "docker",
        &["version", "--format", "{{.Server.Version}}"],
    )
    .await
    .map(|v| v.trim().to_string())
    .filter(|v| !v.is_empty());
    let Some(docker_version) = docker_version else {
        tracing::error!("cannot retrieve Docker version");
        return ProbeReport::fail("Cannot retrieve Docker version.");
    };

    reporter.step("reading Docker Compose version...");
    let compose = compose_version(runner, flavor).await;
    let report = summarize(&docker_version, compose);
    if report.info.has_compose() {
        tracing::info!(
            docker = %report.info.docker_version,
            compose = %report.info.docker_compose_version,
            "environment probe passed"
        );
    } else {
        tracing::warn!(docker = %report.info.docker_version, "compose version unavailable");
    }
    report
}

fn with_detail(hint: &str, detail: &str) -> String {
    if detail.is_empty() {
        hint.to_string()
    } else {
        format!("{hint}\n\n{detail}")
    }
}

async fn compose_version(runner: &impl CommandRunner, flavor: ComposeFlavor) -> Option<String> {
    let try_plugin = matches!(flavor, ComposeFlavor::Auto | ComposeFlavor::Plugin);
    let try_standalone = matches!(flavor, ComposeFlavor::Auto | ComposeFlavor::Standalone);

    if try_plugin && let Some(version) = plugin_version(runner).await {
        return Some(version);
    }
    if try_standalone && let Some(version) = standalone_version(runner).await {
        return Some(version);
    }
    None
}

/// `docker compose version --format json`, falling back to free text.
async fn plugin_version(runner: &impl CommandRunner) -> Option<String> {
    if let Some(out) = stdout_of(runner, "docker", &["compose", "version", "--format", "json"]).await
        && let Some(version) = parse_compose_version_json(&out)
    {
        return Some(version);
    }
    free_text_version(runner, "docker", &["compose", "version"]).await
}

/// `docker-compose version --short`, falling back to free text.
async fn standalone_version(runner: &impl CommandRunner) -> Option<String> {
    if let Some(out) = stdout_of(runner, "docker-compose", &["version", "--short"]).await {
        let short = out.trim();
        let short = short.strip_prefix('v').unwrap_or(short);
        if !short.is_empty() && !short.contains(char::is_whitespace) {
            return Some(short.to_string());
        }
    }
    free_text_version(runner, "docker-compose", &["version"]).await
}

async fn free_text_version(
    runner: &impl CommandRunner,
    program: &str,
    args: &[&str],
) -> Option<String> {
    let out = stdout_of(runner, program, args).await?;
    parse_compose_version(&out)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Stdout of a successful run; `None` if the program failed or did not start.
async fn stdout_of(runner: &impl CommandRunner, program: &str, args: &[&str]) -> Option<String> {
    match runner.run(program, args).await {
        Ok(out) if out.status.success() => Some(String::from_utf8_lossy(&out.stdout).into_owned()),
        Ok(out) => {
            tracing::debug!(program, ?args, code = ?out.status.code(), "command exited non-zero");
            None
        }
        Err(e) => {
            tracing::debug!(program, ?args, error = %e, "command did not run");
            None
        }
    }
}
