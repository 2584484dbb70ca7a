//! Environment versions shared by the checker, the CLI and the web page.

use serde::{Deserialize, Serialize};

/// Versions of the local container tooling and the target cluster.
///
/// Populated once at startup and read-only afterwards. An empty string means
/// the tool was not detected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvironmentInfo {
    /// Docker Engine server version, e.g. `"27.3.1"`.
    pub docker_version: String,
    /// Docker Compose version, e.g. `"2.29.7"`.
    pub docker_compose_version: String,
    /// Kubernetes API server git version, e.g. `"v1.31.2"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kube_version: Option<String>,
}

impl EnvironmentInfo {
    /// Whether a Compose version was detected.
    #[must_use]
    pub fn has_compose(&self) -> bool {
        !self.docker_compose_version.is_empty()
    }
}
