//! Environment probe domain types and version-output parsing.
//!
//! Pure functions only: the probe service feeds raw command output in and
//! gets typed results out.

use kubedash_common::EnvironmentInfo;
use serde::{Deserialize, Serialize};

/// Marker searched for in free-text `docker compose version` output.
pub const VERSION_MARKER: &str = "version";

/// Bytes skipped after the start of [`VERSION_MARKER`]: `"version v"`.
pub const VERSION_OFFSET: usize = "version v".len();

/// Shown when `docker info` fails.
pub const DOCKER_UNAVAILABLE_HINT: &str = "Docker is not running or not installed.\n\
     Install Docker: https://docs.docker.com/get-docker/\n\
     Start the daemon: sudo systemctl start docker (Linux) or open Docker Desktop";

/// Shown when the Compose version cannot be determined.
pub const COMPOSE_UNAVAILABLE: &str = "Compose version unavailable; Docker Compose features are disabled.\n\
     Install Docker Compose: https://docs.docker.com/compose/install/";

// ── Types ─────────────────────────────────────────────────────────────────────

/// Tri-state outcome of the environment probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    /// Docker and Compose detected.
    Pass,
    /// Docker detected, Compose missing.
    Warn,
    /// Docker daemon unreachable or its version unreadable.
    Fail,
}

/// Result of a full environment probe.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub status: ProbeStatus,
    pub message: String,
    pub info: EnvironmentInfo,
}

impl ProbeReport {
    /// `true` unless the probe failed; a Compose warning is still ok.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.status != ProbeStatus::Fail
    }

    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: ProbeStatus::Fail,
            message: message.into(),
            info: EnvironmentInfo::default(),
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Extract the Compose version from free-text output.
///
/// Finds [`VERSION_MARKER`] and returns the remainder after
/// [`VERSION_OFFSET`] bytes, trimmed. `None` when the marker is absent.
/// A remainder shorter than the offset yields `Some("")`.
///
/// ```
/// use kubedash_cli::domain::environment::parse_compose_version;
/// assert_eq!(
///     parse_compose_version("Docker Compose version v2.29.7\n"),
///     Some("2.29.7")
/// );
/// assert_eq!(parse_compose_version("command not found"), None);
/// ```
#[must_use]
pub fn parse_compose_version(output: &str) -> Option<&str> {
    let index = output.find(VERSION_MARKER)?;
    let rest = output.get(index + VERSION_OFFSET..).unwrap_or("");
    Some(rest.trim())
}

#[derive(Deserialize)]
struct ComposeVersionJson {
    version: String,
}

/// Extract the Compose version from `docker compose version --format json`.
///
/// A leading `v` is stripped so the result matches [`parse_compose_version`].
#[must_use]
pub fn parse_compose_version_json(output: &str) -> Option<String> {
    let parsed: ComposeVersionJson = serde_json::from_str(output.trim()).ok()?;
    let version = parsed.version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    (!version.is_empty()).then(|| version.to_string())
}

/// Build the final report once the Docker version is known.
#[must_use]
pub fn summarize(docker_version: &str, compose_version: Option<String>) -> ProbeReport {
    let docker_version = docker_version.trim().to_string();
    match compose_version.filter(|v| !v.is_empty()) {
        Some(compose) => ProbeReport {
            status: ProbeStatus::Pass,
            message: format!("Docker version: {docker_version}, Docker Compose version: {compose}"),
            info: EnvironmentInfo {
                docker_version,
                docker_compose_version: compose,
                kube_version: None,
            },
        },
        None => ProbeReport {
            status: ProbeStatus::Warn,
            message: format!("Docker version: {docker_version}\n{COMPOSE_UNAVAILABLE}"),
            info: EnvironmentInfo {
                docker_version,
                docker_compose_version: String::new(),
                kube_version: None,
            },
        },
    }
}
