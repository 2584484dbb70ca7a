//! Dashboard configuration and the Compose flavor selector.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Which Compose front end to query for its version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ComposeFlavor {
    /// Try the `docker compose` plugin, then the legacy `docker-compose` binary.
    #[default]
    Auto,
    /// Only `docker compose` (Compose v2 plugin).
    Plugin,
    /// Only the standalone `docker-compose` binary.
    Standalone,
}

/// Dashboard configuration, read from `~/.kubedash/config.yaml`.
///
/// Every field has a default so an absent or partial file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Listen address for `kubedash serve` (default: 127.0.0.1:8080)
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    /// Compose front end used by the environment probe
    #[serde(default)]
    pub compose: ComposeFlavor,

    /// Namespace for manifest documents that do not set one
    #[serde(default = "default_namespace")]
    pub default_namespace: String,
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_namespace() -> String {
    "default".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            compose: ComposeFlavor::default(),
            default_namespace: default_namespace(),
        }
    }
}
